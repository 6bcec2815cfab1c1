pub mod pagination;
pub mod table;
pub mod wordcloud;

pub use pagination::{
    clamp_page, page_range, total_pages, CUSTOMER_TABLE_PAGE_SIZE, LIST_PAGE_SIZE,
    PRODUCT_SELECTOR_PAGE_SIZE,
};
pub use table::{SortKey, SortOrder, TablePage, TableRow, TableState};
pub use wordcloud::{layout_word_cloud, PlacedWord};
