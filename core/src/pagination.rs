//! Page window normalization for poll listings.

/// Default page size when the caller does not pick one.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page the service will be asked for.
pub const MAX_LIMIT: u32 = 100;

/// A clamped `skip`/`limit` pair. Construct with `PageWindow::clamped`; the
/// fields always satisfy `limit` in `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u32,
    pub limit: u32,
}

impl PageWindow {
    /// Coerce arbitrary caller input into range. Out-of-range values snap to
    /// the nearest bound; nothing is rejected.
    pub fn clamped(skip: i64, limit: i64) -> Self {
        let skip = u32::try_from(skip.max(0)).unwrap_or(u32::MAX);
        let limit = limit.clamp(1, i64::from(MAX_LIMIT)) as u32;
        Self { skip, limit }
    }

    pub fn query(&self) -> String {
        format!("skip={}&limit={}", self.skip, self.limit)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_skip_becomes_zero() {
        for skip in [-1, -50, i64::MIN] {
            assert_eq!(PageWindow::clamped(skip, 10).skip, 0);
        }
    }

    #[test]
    fn limit_is_clamped_to_bounds() {
        assert_eq!(PageWindow::clamped(0, 0).limit, 1);
        assert_eq!(PageWindow::clamped(0, -7).limit, 1);
        assert_eq!(PageWindow::clamped(0, 101).limit, 100);
        assert_eq!(PageWindow::clamped(0, i64::MAX).limit, 100);
        assert_eq!(PageWindow::clamped(0, 1).limit, 1);
        assert_eq!(PageWindow::clamped(0, 100).limit, 100);
    }

    #[test]
    fn in_range_values_pass_through() {
        assert_eq!(PageWindow::clamped(25, 5), PageWindow { skip: 25, limit: 5 });
    }

    #[test]
    fn huge_skip_saturates() {
        assert_eq!(PageWindow::clamped(i64::MAX, 10).skip, u32::MAX);
    }

    #[test]
    fn default_window() {
        assert_eq!(PageWindow::default(), PageWindow { skip: 0, limit: 10 });
        assert_eq!(PageWindow::default().query(), "skip=0&limit=10");
    }
}
