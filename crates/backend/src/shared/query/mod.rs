//! Конвейер запросов в памяти для отчётных эндпоинтов:
//! filter → sort → paginate для списков, filter → aggregate для статистики.
//!
//! Каждая сущность один раз описывает поля фильтрации и сортировки
//! таблицами функций-аксессоров, а блоки здесь обобщены
//! по типу строки.

pub mod aggregate;
pub mod filter;
pub mod paginate;
pub mod params;
pub mod sort;
pub mod timeline;

pub use filter::{DateField, Filter, IntField, TextField};
pub use paginate::PageRequest;
pub use sort::{Direction, SortKey, SortTable, SortValue};
pub use timeline::Period;
