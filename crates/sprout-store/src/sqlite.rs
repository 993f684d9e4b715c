// SPDX-License-Identifier: Apache-2.0

use crate::clock::{now_rfc3339, rfc3339_ago};
use crate::schema::SCHEMA;
use crate::{ContentStore, OrderedKind, StoreError, ACTIVE_WINDOW_SECS};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use sprout_core::OrderUpdate;
use sprout_model::{
    AdminSession, Article, ArticleDraft, Badge, EntityId, HeroSlide, HeroSlideDraft, NewsClipping,
    NewsClippingDraft, PageType, PageView, PageViewDraft, SiteSettings, TagStat, Top10Item,
    Top10ItemDraft, VisitorStats,
};
use std::path::Path;
use tokio::sync::Mutex;

/// SQLite-backed [`ContentStore`]. One connection behind a mutex;
/// every method is a handful of row-level statements and nothing here
/// opens a transaction across them.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn badges_to_json(badges: &[Badge]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(badges)?)
}

fn badges_from_json(raw: &str) -> Vec<Badge> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn start_of_today() -> String {
    format!("{}T00:00:00Z", crate::clock::today_utc())
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn list_hero_slides(&self) -> Result<Vec<HeroSlide>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, image, title, badges, order_index, is_active, updated_at
             FROM hero_slides ORDER BY order_index",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(HeroSlide {
                id: EntityId::from_raw(row.get(0)?),
                image: row.get(1)?,
                title: row.get(2)?,
                badges: badges_from_json(&row.get::<_, String>(3)?),
                order_index: row.get(4)?,
                is_active: row.get(5)?,
                updated_at: row.get(6)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    async fn insert_hero_slide(
        &self,
        draft: HeroSlideDraft,
        order_index: u32,
    ) -> Result<HeroSlide, StoreError> {
        let now = now_rfc3339();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO hero_slides (image, title, badges, order_index, is_active, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.image,
                draft.title,
                badges_to_json(&draft.badges)?,
                order_index,
                draft.is_active,
                now
            ],
        )?;
        Ok(HeroSlide {
            id: EntityId::from_raw(conn.last_insert_rowid()),
            image: draft.image,
            title: draft.title,
            badges: draft.badges,
            order_index,
            is_active: draft.is_active,
            updated_at: now,
        })
    }

    async fn update_hero_slide(
        &self,
        id: EntityId,
        draft: HeroSlideDraft,
    ) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "UPDATE hero_slides SET image = ?1, title = ?2, badges = ?3, is_active = ?4,
             updated_at = ?5 WHERE id = ?6",
            params![
                draft.image,
                draft.title,
                badges_to_json(&draft.badges)?,
                draft.is_active,
                now_rfc3339(),
                id.as_i64()
            ],
        )?;
        Ok(affected as u64)
    }

    async fn list_news_clippings(&self) -> Result<Vec<NewsClipping>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, image, title, order_index, is_active, updated_at
             FROM news_clippings ORDER BY order_index",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(NewsClipping {
                id: EntityId::from_raw(row.get(0)?),
                image: row.get(1)?,
                title: row.get(2)?,
                order_index: row.get(3)?,
                is_active: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    async fn insert_news_clipping(
        &self,
        draft: NewsClippingDraft,
        order_index: u32,
    ) -> Result<NewsClipping, StoreError> {
        let now = now_rfc3339();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO news_clippings (image, title, order_index, is_active, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![draft.image, draft.title, order_index, draft.is_active, now],
        )?;
        Ok(NewsClipping {
            id: EntityId::from_raw(conn.last_insert_rowid()),
            image: draft.image,
            title: draft.title,
            order_index,
            is_active: draft.is_active,
            updated_at: now,
        })
    }

    async fn update_news_clipping(
        &self,
        id: EntityId,
        draft: NewsClippingDraft,
    ) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "UPDATE news_clippings SET image = ?1, title = ?2, is_active = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                draft.image,
                draft.title,
                draft.is_active,
                now_rfc3339(),
                id.as_i64()
            ],
        )?;
        Ok(affected as u64)
    }

    async fn list_top10_items(&self) -> Result<Vec<Top10Item>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, title, order_index, is_active, updated_at
             FROM top10_items ORDER BY order_index",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Top10Item {
                id: EntityId::from_raw(row.get(0)?),
                title: row.get(1)?,
                order_index: row.get(2)?,
                is_active: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    async fn insert_top10_item(
        &self,
        draft: Top10ItemDraft,
        order_index: u32,
    ) -> Result<Top10Item, StoreError> {
        let now = now_rfc3339();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO top10_items (title, order_index, is_active, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![draft.title, order_index, draft.is_active, now],
        )?;
        Ok(Top10Item {
            id: EntityId::from_raw(conn.last_insert_rowid()),
            title: draft.title,
            order_index,
            is_active: draft.is_active,
            updated_at: now,
        })
    }

    async fn update_top10_item(
        &self,
        id: EntityId,
        draft: Top10ItemDraft,
    ) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "UPDATE top10_items SET title = ?1, is_active = ?2, updated_at = ?3 WHERE id = ?4",
            params![draft.title, draft.is_active, now_rfc3339(), id.as_i64()],
        )?;
        Ok(affected as u64)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, image, badges, category, published_date,
                    is_featured, is_active, order_index, updated_at
             FROM articles ORDER BY published_date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Article {
                id: EntityId::from_raw(row.get(0)?),
                title: row.get(1)?,
                description: row.get(2)?,
                image: row.get(3)?,
                badges: badges_from_json(&row.get::<_, String>(4)?),
                category: row.get(5)?,
                published_date: row.get(6)?,
                is_featured: row.get(7)?,
                is_active: row.get(8)?,
                order_index: row.get(9)?,
                updated_at: row.get(10)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    async fn insert_article(&self, draft: ArticleDraft) -> Result<Article, StoreError> {
        let now = now_rfc3339();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO articles (title, description, image, badges, category, published_date,
                                   is_featured, is_active, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                draft.title,
                draft.description,
                draft.image,
                badges_to_json(&draft.badges)?,
                draft.category,
                now,
                draft.is_featured,
                draft.is_active,
                now
            ],
        )?;
        Ok(Article {
            id: EntityId::from_raw(conn.last_insert_rowid()),
            title: draft.title,
            description: draft.description,
            image: draft.image,
            badges: draft.badges,
            category: draft.category,
            published_date: now.clone(),
            is_featured: draft.is_featured,
            is_active: draft.is_active,
            order_index: None,
            updated_at: now,
        })
    }

    async fn update_article(&self, id: EntityId, draft: ArticleDraft) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "UPDATE articles SET title = ?1, description = ?2, image = ?3, badges = ?4,
             category = ?5, is_featured = ?6, is_active = ?7, updated_at = ?8 WHERE id = ?9",
            params![
                draft.title,
                draft.description,
                draft.image,
                badges_to_json(&draft.badges)?,
                draft.category,
                draft.is_featured,
                draft.is_active,
                now_rfc3339(),
                id.as_i64()
            ],
        )?;
        Ok(affected as u64)
    }

    async fn set_article_featured(
        &self,
        id: EntityId,
        is_featured: bool,
    ) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "UPDATE articles SET is_featured = ?1, updated_at = ?2 WHERE id = ?3",
            params![is_featured, now_rfc3339(), id.as_i64()],
        )?;
        Ok(affected as u64)
    }

    async fn apply_order_updates(
        &self,
        kind: OrderedKind,
        updates: &[OrderUpdate],
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        let sql = format!("UPDATE {} SET order_index = ?1 WHERE id = ?2", kind.table());
        for update in updates {
            conn.execute(&sql, params![update.order_index, update.id.as_i64()])?;
        }
        Ok(())
    }

    async fn set_active(
        &self,
        kind: OrderedKind,
        id: EntityId,
        is_active: bool,
    ) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "UPDATE {} SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
            kind.table()
        );
        let affected = conn.execute(&sql, params![is_active, now_rfc3339(), id.as_i64()])?;
        Ok(affected as u64)
    }

    async fn delete_row(&self, kind: OrderedKind, id: EntityId) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
        let affected = conn.execute(&sql, params![id.as_i64()])?;
        Ok(affected as u64)
    }

    async fn load_settings(&self) -> Result<SiteSettings, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT key, value FROM site_settings")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let rows: Vec<(String, String)> = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(SiteSettings::from_rows(&rows))
    }

    async fn save_settings(&self, settings: &SiteSettings) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        for (key, value) in settings.to_rows() {
            conn.execute(
                "INSERT INTO site_settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
        }
        Ok(())
    }

    async fn record_page_view(&self, draft: &PageViewDraft) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO page_views (page_type, page_id, visitor_id, session_id, user_agent,
                                     referrer, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                draft.page_type.as_str(),
                draft.page_id,
                draft.visitor_id,
                draft.session_id,
                draft.user_agent,
                draft.referrer,
                now_rfc3339()
            ],
        )?;
        Ok(())
    }

    async fn touch_active_visitor(
        &self,
        visitor_id: &str,
        page_type: PageType,
        page_id: Option<&str>,
        user_agent: &str,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO active_visitors (visitor_id, page_type, page_id, user_agent, last_activity)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(visitor_id) DO UPDATE SET
                 page_type = excluded.page_type,
                 page_id = excluded.page_id,
                 user_agent = excluded.user_agent,
                 last_activity = excluded.last_activity",
            params![
                visitor_id,
                page_type.as_str(),
                page_id,
                user_agent,
                now_rfc3339()
            ],
        )?;
        Ok(())
    }

    async fn bump_tag_stat(&self, tag_name: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO tag_stats (tag_name, view_count, last_viewed_at) VALUES (?1, 1, ?2)
             ON CONFLICT(tag_name) DO UPDATE SET
                 view_count = view_count + 1,
                 last_viewed_at = excluded.last_viewed_at",
            params![tag_name, now_rfc3339()],
        )?;
        Ok(())
    }

    async fn visitor_stats(&self) -> Result<VisitorStats, StoreError> {
        let conn = self.conn.lock().await;
        let window_start = rfc3339_ago(ACTIVE_WINDOW_SECS);
        let day_start = start_of_today();
        let active_visitors: u64 = conn.query_row(
            "SELECT COUNT(*) FROM active_visitors WHERE last_activity >= ?1",
            params![window_start],
            |row| row.get(0),
        )?;
        let total_views: u64 =
            conn.query_row("SELECT COUNT(*) FROM page_views", [], |row| row.get(0))?;
        let today_views: u64 = conn.query_row(
            "SELECT COUNT(*) FROM page_views WHERE created_at >= ?1",
            params![day_start],
            |row| row.get(0),
        )?;
        let today_unique_visitors: u64 = conn.query_row(
            "SELECT COUNT(DISTINCT visitor_id) FROM page_views WHERE created_at >= ?1",
            params![day_start],
            |row| row.get(0),
        )?;
        Ok(VisitorStats {
            active_visitors,
            total_views,
            today_views,
            today_unique_visitors,
        })
    }

    async fn popular_tags(&self, limit: usize) -> Result<Vec<TagStat>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT tag_name, view_count, last_viewed_at FROM tag_stats
             ORDER BY view_count DESC, tag_name LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(TagStat {
                tag_name: row.get(0)?,
                view_count: row.get(1)?,
                last_viewed_at: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    async fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT page_type, page_id, visitor_id, session_id, user_agent, referrer, created_at
             FROM page_views ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            let raw: String = row.get(0)?;
            Ok(PageView {
                page_type: PageType::parse(&raw).unwrap_or(PageType::Home),
                page_id: row.get(1)?,
                visitor_id: row.get(2)?,
                session_id: row.get(3)?,
                user_agent: row.get(4)?,
                referrer: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    async fn insert_session(&self, session: &AdminSession) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO admin_sessions (token, expires_at, created_at) VALUES (?1, ?2, ?3)",
            params![session.token, session.expires_at, session.created_at],
        )?;
        Ok(())
    }

    async fn session_is_valid(&self, token: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM admin_sessions WHERE token = ?1 AND expires_at > ?2",
            params![token, now_rfc3339()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM admin_sessions WHERE token = ?1",
            params![token],
        )?;
        Ok(())
    }

    async fn purge_expired_sessions(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().await;
        let affected = conn.execute(
            "DELETE FROM admin_sessions WHERE expires_at <= ?1",
            params![now_rfc3339()],
        )?;
        Ok(affected as u64)
    }
}
