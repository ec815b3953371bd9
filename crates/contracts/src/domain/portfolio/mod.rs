pub mod category;
pub mod project;
pub mod skill;
pub mod technology;
