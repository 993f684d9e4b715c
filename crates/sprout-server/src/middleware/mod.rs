// SPDX-License-Identifier: Apache-2.0

pub(crate) mod admin_gate;
pub(crate) mod request_tracing;
