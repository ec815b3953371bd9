pub mod analytics;
pub mod blog_category;
pub mod blog_comment;
pub mod blog_post;
pub mod blog_stats;
pub mod blog_subscription;
pub mod blog_tag;
pub mod contact_message;
pub mod portfolio_category;
pub mod portfolio_project;
pub mod portfolio_skill;
pub mod portfolio_technology;
