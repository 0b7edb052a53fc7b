#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sitepath_core::{Candidate, SiteContext};
use sitepath_test_utils::Sandbox;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap()
}

/// Primary site first, user site as fallback, cwd at the sandbox root.
pub fn context(sandbox: &Sandbox) -> SiteContext {
    SiteContext::from_candidates(
        vec![
            Candidate::new(sandbox.site()),
            Candidate::user(sandbox.user_site()),
        ],
        sandbox.root(),
    )
    .with_now(fixed_now())
}
