//! Общие типы домена: агрегаты, DTO и вспомогательные структуры,
//! разделяемые между слоями бэкенда.

pub mod domain;
