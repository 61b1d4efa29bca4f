pub mod browser;

pub use browser::{browser_fragment, browser_page};
