use chrono::NaiveDateTime;

use super::params::{parse_date, parse_int, present, split_list};
use crate::shared::error::AppResult;

/// Аксессор текстовой колонки
pub type TextField<R> = for<'a> fn(&'a R) -> Option<&'a str>;
/// Аксессор целочисленной колонки
pub type IntField<R> = fn(&R) -> Option<i64>;
/// Аксессор колонки с датой
pub type DateField<R> = fn(&R) -> Option<NaiveDateTime>;

enum Clause<R> {
    TextEquals(TextField<R>, String),
    IntEquals(IntField<R>, i64),
    Contains(TextField<R>, String),
    ContainsAny(TextField<R>, Vec<String>),
    From(DateField<R>, NaiveDateTime),
    To(DateField<R>, NaiveDateTime),
    Search(Vec<TextField<R>>, String),
}

impl<R> Clause<R> {
    fn matches(&self, row: &R) -> bool {
        match self {
            Clause::TextEquals(field, value) => field(row) == Some(value.as_str()),
            Clause::IntEquals(field, value) => field(row) == Some(*value),
            Clause::Contains(field, value) => field(row).is_some_and(|v| v.contains(value.as_str())),
            Clause::ContainsAny(field, tokens) => field(row)
                .is_some_and(|v| tokens.iter().any(|t| v.contains(t.as_str()))),
            Clause::From(field, from) => field(row).is_some_and(|v| v >= *from),
            Clause::To(field, to) => field(row).is_some_and(|v| v <= *to),
            Clause::Search(fields, term) => fields
                .iter()
                .any(|field| field(row).is_some_and(|v| v.contains(term.as_str()))),
        }
    }
}

/// Конъюнкция условий по параметрам запроса (сырые строки).
///
/// Пустое или отсутствующее значение условия не добавляет, поэтому фильтр
/// из пустого запроса пропускает все строки. NULL в колонке не проходит
/// ни одно заданное условие.
pub struct Filter<R> {
    clauses: Vec<Clause<R>>,
}

impl<R> Default for Filter<R> {
    fn default() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }
}

impl<R> Filter<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, field: TextField<R>, value: Option<&str>) -> Self {
        if let Some(value) = present(value) {
            self.clauses.push(Clause::TextEquals(field, value.to_string()));
        }
        self
    }

    /// Точное совпадение целого; нечисловое значение отклоняет запрос
    pub fn equals_int(mut self, name: &str, field: IntField<R>, value: Option<&str>) -> AppResult<Self> {
        if let Some(value) = parse_int(name, value)? {
            self.clauses.push(Clause::IntEquals(field, value));
        }
        Ok(self)
    }

    /// Подстрока, с учётом регистра
    pub fn contains(mut self, field: TextField<R>, value: Option<&str>) -> Self {
        if let Some(value) = present(value) {
            self.clauses.push(Clause::Contains(field, value.to_string()));
        }
        self
    }

    /// Список через запятую, достаточно совпадения любой подстроки
    pub fn contains_any(mut self, field: TextField<R>, value: Option<&str>) -> Self {
        let tokens = split_list(value);
        if !tokens.is_empty() {
            self.clauses.push(Clause::ContainsAny(field, tokens));
        }
        self
    }

    /// Границы `dateFrom` / `dateTo` включительно, каждая необязательна
    pub fn date_range(mut self, field: DateField<R>, from: Option<&str>, to: Option<&str>) -> AppResult<Self> {
        if let Some(from) = parse_date("dateFrom", from)? {
            self.clauses.push(Clause::From(field, from));
        }
        if let Some(to) = parse_date("dateTo", to)? {
            self.clauses.push(Clause::To(field, to));
        }
        Ok(self)
    }

    /// Поиск: строка должна встречаться хотя бы в одном из `fields`
    pub fn search(mut self, fields: &[TextField<R>], term: Option<&str>) -> Self {
        if let Some(term) = present(term) {
            self.clauses
                .push(Clause::Search(fields.to_vec(), term.to_string()));
        }
        self
    }

    pub fn is_open(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, row: &R) -> bool {
        self.clauses.iter().all(|clause| clause.matches(row))
    }

    pub fn apply(&self, mut rows: Vec<R>) -> Vec<R> {
        if !self.is_open() {
            rows.retain(|row| self.matches(row));
        }
        rows
    }
}
