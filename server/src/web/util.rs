use serde::Deserialize;

/// Number of questions per page of the paginated question lists
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Query parameters of paginated list endpoints
#[derive(Deserialize, Debug)]
pub struct PageQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// Get the slice of `items` belonging to the given 1-based `page`, with [QUESTIONS_PER_PAGE] items
/// per page.
///
/// Page 0 and pages beyond the end of the list are empty.
pub fn paginate<T>(items: &[T], page: u32) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page as usize - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = usize::min(start + QUESTIONS_PER_PAGE, items.len());
    &items[start..end]
}
