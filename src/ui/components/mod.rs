pub mod article_form;
pub mod breadcrumbs;
pub mod palette;
pub mod theme;
