// SPDX-License-Identifier: Apache-2.0

use crate::clock::{now_rfc3339, rfc3339_ago, today_utc};
use crate::{ContentStore, OrderedKind, StoreError, ACTIVE_WINDOW_SECS};
use async_trait::async_trait;
use sprout_core::OrderUpdate;
use sprout_model::{
    AdminSession, Article, ArticleDraft, EntityId, HeroSlide, HeroSlideDraft, NewsClipping,
    NewsClippingDraft, PageType, PageView, PageViewDraft, SiteSettings, TagStat, Top10Item,
    Top10ItemDraft, VisitorStats,
};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    hero: Vec<HeroSlide>,
    news: Vec<NewsClipping>,
    top10: Vec<Top10Item>,
    articles: Vec<Article>,
    settings: Vec<(String, String)>,
    page_views: Vec<PageView>,
    active_visitors: HashMap<String, String>,
    tag_stats: BTreeMap<String, TagStat>,
    sessions: HashMap<String, AdminSession>,
    next_id: i64,
}

impl Inner {
    fn mint_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId::from_raw(self.next_id)
    }
}

/// In-memory [`ContentStore`] for tests: same observable contract as
/// the SQLite backend, no disk.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    /// When set, every mutating call fails. Lets tests observe the
    /// "log, keep stale state, re-read later" failure policy.
    pub fail_writes: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_guard(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(std::sync::atomic::Ordering::Relaxed) {
            return Err(StoreError("injected write failure".to_string()));
        }
        Ok(())
    }
}

fn sort_ranked<T, F: Fn(&T) -> u32>(rows: &mut [T], rank: F) {
    rows.sort_by_key(|row| rank(row));
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_hero_slides(&self) -> Result<Vec<HeroSlide>, StoreError> {
        let mut rows = self.inner.lock().await.hero.clone();
        sort_ranked(&mut rows, |row| row.order_index);
        Ok(rows)
    }

    async fn insert_hero_slide(
        &self,
        draft: HeroSlideDraft,
        order_index: u32,
    ) -> Result<HeroSlide, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        let slide = HeroSlide {
            id: inner.mint_id(),
            image: draft.image,
            title: draft.title,
            badges: draft.badges,
            order_index,
            is_active: draft.is_active,
            updated_at: now_rfc3339(),
        };
        inner.hero.push(slide.clone());
        Ok(slide)
    }

    async fn update_hero_slide(
        &self,
        id: EntityId,
        draft: HeroSlideDraft,
    ) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        match inner.hero.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.image = draft.image;
                row.title = draft.title;
                row.badges = draft.badges;
                row.is_active = draft.is_active;
                row.updated_at = now_rfc3339();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_news_clippings(&self) -> Result<Vec<NewsClipping>, StoreError> {
        let mut rows = self.inner.lock().await.news.clone();
        sort_ranked(&mut rows, |row| row.order_index);
        Ok(rows)
    }

    async fn insert_news_clipping(
        &self,
        draft: NewsClippingDraft,
        order_index: u32,
    ) -> Result<NewsClipping, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        let clipping = NewsClipping {
            id: inner.mint_id(),
            image: draft.image,
            title: draft.title,
            order_index,
            is_active: draft.is_active,
            updated_at: now_rfc3339(),
        };
        inner.news.push(clipping.clone());
        Ok(clipping)
    }

    async fn update_news_clipping(
        &self,
        id: EntityId,
        draft: NewsClippingDraft,
    ) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        match inner.news.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.image = draft.image;
                row.title = draft.title;
                row.is_active = draft.is_active;
                row.updated_at = now_rfc3339();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_top10_items(&self) -> Result<Vec<Top10Item>, StoreError> {
        let mut rows = self.inner.lock().await.top10.clone();
        sort_ranked(&mut rows, |row| row.order_index);
        Ok(rows)
    }

    async fn insert_top10_item(
        &self,
        draft: Top10ItemDraft,
        order_index: u32,
    ) -> Result<Top10Item, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        let item = Top10Item {
            id: inner.mint_id(),
            title: draft.title,
            order_index,
            is_active: draft.is_active,
            updated_at: now_rfc3339(),
        };
        inner.top10.push(item.clone());
        Ok(item)
    }

    async fn update_top10_item(
        &self,
        id: EntityId,
        draft: Top10ItemDraft,
    ) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        match inner.top10.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.title = draft.title;
                row.is_active = draft.is_active;
                row.updated_at = now_rfc3339();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_articles(&self) -> Result<Vec<Article>, StoreError> {
        let mut rows = self.inner.lock().await.articles.clone();
        rows.sort_by(|a, b| {
            b.published_date
                .cmp(&a.published_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn insert_article(&self, draft: ArticleDraft) -> Result<Article, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        let now = now_rfc3339();
        let article = Article {
            id: inner.mint_id(),
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
        };
        inner.articles.push(article.clone());
        Ok(article)
    }

    async fn update_article(&self, id: EntityId, draft: ArticleDraft) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        match inner.articles.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.title = draft.title;
                row.description = draft.description;
                row.image = draft.image;
                row.badges = draft.badges;
                row.category = draft.category;
                row.is_featured = draft.is_featured;
                row.is_active = draft.is_active;
                row.updated_at = now_rfc3339();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_article_featured(
        &self,
        id: EntityId,
        is_featured: bool,
    ) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        match inner.articles.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.is_featured = is_featured;
                row.updated_at = now_rfc3339();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn apply_order_updates(
        &self,
        kind: OrderedKind,
        updates: &[OrderUpdate],
    ) -> Result<(), StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        for update in updates {
            match kind {
                OrderedKind::Hero => {
                    if let Some(row) = inner.hero.iter_mut().find(|row| row.id == update.id) {
                        row.order_index = update.order_index;
                    }
                }
                OrderedKind::News => {
                    if let Some(row) = inner.news.iter_mut().find(|row| row.id == update.id) {
                        row.order_index = update.order_index;
                    }
                }
                OrderedKind::Top10 => {
                    if let Some(row) = inner.top10.iter_mut().find(|row| row.id == update.id) {
                        row.order_index = update.order_index;
                    }
                }
                OrderedKind::Article => {
                    if let Some(row) = inner.articles.iter_mut().find(|row| row.id == update.id) {
                        row.order_index = Some(update.order_index);
                    }
                }
            }
        }
        Ok(())
    }

    async fn set_active(
        &self,
        kind: OrderedKind,
        id: EntityId,
        is_active: bool,
    ) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        let now = now_rfc3339();
        let affected = match kind {
            OrderedKind::Hero => inner.hero.iter_mut().find(|row| row.id == id).map(|row| {
                row.is_active = is_active;
                row.updated_at = now.clone();
            }),
            OrderedKind::News => inner.news.iter_mut().find(|row| row.id == id).map(|row| {
                row.is_active = is_active;
                row.updated_at = now.clone();
            }),
            OrderedKind::Top10 => inner.top10.iter_mut().find(|row| row.id == id).map(|row| {
                row.is_active = is_active;
                row.updated_at = now.clone();
            }),
            OrderedKind::Article => inner
                .articles
                .iter_mut()
                .find(|row| row.id == id)
                .map(|row| {
                    row.is_active = is_active;
                    row.updated_at = now.clone();
                }),
        };
        Ok(u64::from(affected.is_some()))
    }

    async fn delete_row(&self, kind: OrderedKind, id: EntityId) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        let before;
        let after;
        match kind {
            OrderedKind::Hero => {
                before = inner.hero.len();
                inner.hero.retain(|row| row.id != id);
                after = inner.hero.len();
            }
            OrderedKind::News => {
                before = inner.news.len();
                inner.news.retain(|row| row.id != id);
                after = inner.news.len();
            }
            OrderedKind::Top10 => {
                before = inner.top10.len();
                inner.top10.retain(|row| row.id != id);
                after = inner.top10.len();
            }
            OrderedKind::Article => {
                before = inner.articles.len();
                inner.articles.retain(|row| row.id != id);
                after = inner.articles.len();
            }
        }
        Ok((before - after) as u64)
    }

    async fn load_settings(&self) -> Result<SiteSettings, StoreError> {
        let inner = self.inner.lock().await;
        Ok(SiteSettings::from_rows(&inner.settings))
    }

    async fn save_settings(&self, settings: &SiteSettings) -> Result<(), StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        for (key, value) in settings.to_rows() {
            match inner.settings.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => inner.settings.push((key, value)),
            }
        }
        Ok(())
    }

    async fn record_page_view(&self, draft: &PageViewDraft) -> Result<(), StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        inner.page_views.push(PageView {
            page_type: draft.page_type,
            page_id: draft.page_id.clone(),
            visitor_id: draft.visitor_id.clone(),
            session_id: draft.session_id.clone(),
            user_agent: draft.user_agent.clone(),
            referrer: draft.referrer.clone(),
            created_at: now_rfc3339(),
        });
        Ok(())
    }

    async fn touch_active_visitor(
        &self,
        visitor_id: &str,
        _page_type: PageType,
        _page_id: Option<&str>,
        _user_agent: &str,
    ) -> Result<(), StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        inner
            .active_visitors
            .insert(visitor_id.to_string(), now_rfc3339());
        Ok(())
    }

    async fn bump_tag_stat(&self, tag_name: &str) -> Result<(), StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        let now = now_rfc3339();
        inner
            .tag_stats
            .entry(tag_name.to_string())
            .and_modify(|stat| {
                stat.view_count += 1;
                stat.last_viewed_at = now.clone();
            })
            .or_insert_with(|| TagStat {
                tag_name: tag_name.to_string(),
                view_count: 1,
                last_viewed_at: now,
            });
        Ok(())
    }

    async fn visitor_stats(&self) -> Result<VisitorStats, StoreError> {
        let inner = self.inner.lock().await;
        let window_start = rfc3339_ago(ACTIVE_WINDOW_SECS);
        let day_start = format!("{}T00:00:00Z", today_utc());
        Ok(VisitorStats {
            active_visitors: inner
                .active_visitors
                .values()
                .filter(|seen| seen.as_str() >= window_start.as_str())
                .count() as u64,
            total_views: inner.page_views.len() as u64,
            today_views: inner
                .page_views
                .iter()
                .filter(|view| view.created_at >= day_start)
                .count() as u64,
            today_unique_visitors: inner
                .page_views
                .iter()
                .filter(|view| view.created_at >= day_start)
                .map(|view| view.visitor_id.as_str())
                .collect::<std::collections::HashSet<_>>()
                .len() as u64,
        })
    }

    async fn popular_tags(&self, limit: usize) -> Result<Vec<TagStat>, StoreError> {
        let inner = self.inner.lock().await;
        let mut tags: Vec<TagStat> = inner.tag_stats.values().cloned().collect();
        tags.sort_by(|a, b| {
            b.view_count
                .cmp(&a.view_count)
                .then_with(|| a.tag_name.cmp(&b.tag_name))
        });
        tags.truncate(limit);
        Ok(tags)
    }

    async fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>, StoreError> {
        let inner = self.inner.lock().await;
        let mut views = inner.page_views.clone();
        views.reverse();
        views.truncate(limit);
        Ok(views)
    }

    async fn insert_session(&self, session: &AdminSession) -> Result<(), StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        inner
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn session_is_valid(&self, token: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .sessions
            .get(token)
            .is_some_and(|session| session.expires_at.as_str() > now_rfc3339().as_str()))
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.write_guard()?;
        self.inner.lock().await.sessions.remove(token);
        Ok(())
    }

    async fn purge_expired_sessions(&self) -> Result<u64, StoreError> {
        self.write_guard()?;
        let mut inner = self.inner.lock().await;
        let now = now_rfc3339();
        let before = inner.sessions.len();
        inner
            .sessions
            .retain(|_, session| session.expires_at.as_str() > now.as_str());
        Ok((before - inner.sessions.len()) as u64)
    }
}
