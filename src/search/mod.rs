pub mod builder;
pub mod filter;

pub use builder::{build_search, BuiltQuery, QueryParam};
pub use filter::SearchFilter;

/// Page count for a total row count, 0 when nothing matched.
pub fn total_pages(total: i64, per_page: u32) -> i64 {
    if per_page == 0 {
        return 0;
    }
    (total + per_page as i64 - 1) / per_page as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 60), 0);
        assert_eq!(total_pages(1, 60), 1);
        assert_eq!(total_pages(60, 60), 1);
        assert_eq!(total_pages(61, 60), 2);
        assert_eq!(total_pages(45, 20), 3);
    }

    #[test]
    fn total_pages_zero_iff_total_zero() {
        for total in 0..200i64 {
            let pages = total_pages(total, 7);
            assert_eq!(pages == 0, total == 0);
            // ceil(total / per_page)
            assert_eq!(pages, (total as f64 / 7.0).ceil() as i64);
        }
    }
}
