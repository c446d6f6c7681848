pub mod page_title;

pub use page_title::{PageTitleClient, TitleSource};
