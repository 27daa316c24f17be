use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// Значение колонки для сортировки. `None` меньше любого значения.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(Option<&'a str>),
    Int(Option<i64>),
    Decimal(Option<f64>),
    Date(Option<NaiveDateTime>),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Decimal(a), SortValue::Decimal(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            },
            // ключ всегда отдаёт один вариант
            _ => Ordering::Equal,
        }
    }
}

pub type SortField<R> = for<'a> fn(&'a R) -> SortValue<'a>;

pub struct SortKey<R: 'static> {
    pub name: &'static str,
    pub value: SortField<R>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// По возрастанию только при точном `asc`
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Direction::Asc,
            _ => Direction::Desc,
        }
    }
}

/// Белый список ключей сортировки сущности и ключ по умолчанию.
/// При неизвестном ключе ключ по умолчанию применяется по убыванию.
pub struct SortTable<R: 'static> {
    pub keys: &'static [SortKey<R>],
    pub default_key: &'static str,
}

impl<R: 'static> SortTable<R> {
    fn find(&self, name: &str) -> Option<&'static SortKey<R>> {
        let keys: &'static [SortKey<R>] = self.keys;
        keys.iter().find(|k| k.name.eq_ignore_ascii_case(name))
    }

    /// Ключ не задан: ключ по умолчанию в запрошенном направлении.
    /// Неизвестный или пустой ключ: ключ по умолчанию, по убыванию.
    pub fn resolve(&self, key: Option<&str>, direction: Option<&str>) -> Sort<R> {
        let Some(name) = key else {
            return Sort {
                key: self.find(self.default_key),
                direction: Direction::parse(direction),
            };
        };
        match self.find(name.trim()) {
            Some(key) => Sort {
                key: Some(key),
                direction: Direction::parse(direction),
            },
            None => Sort {
                key: self.find(self.default_key),
                direction: Direction::Desc,
            },
        }
    }
}

/// Готовый к применению порядок
pub struct Sort<R: 'static> {
    key: Option<&'static SortKey<R>>,
    direction: Direction,
}

impl<R: 'static> Sort<R> {
    pub fn key_name(&self) -> Option<&'static str> {
        self.key.map(|k| k.name)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Стабильная сортировка; равные сохраняют порядок хранения
    pub fn apply(&self, rows: &mut [R]) {
        if let Some(key) = self.key {
            sort_rows(rows, key.value, self.direction);
        }
    }
}

/// Сортировка по фиксированному аксессору, вне белого списка
pub fn sort_rows<R>(rows: &mut [R], value: SortField<R>, direction: Direction) {
    rows.sort_by(|a, b| {
        let ordering = value(a).compare(&value(b));
        match direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        amount: Option<f64>,
    }

    fn by_name(r: &Row) -> SortValue<'_> {
        SortValue::Text(Some(r.name))
    }

    fn by_amount(r: &Row) -> SortValue<'_> {
        SortValue::Decimal(r.amount)
    }

    static TABLE: SortTable<Row> = SortTable {
        keys: &[
            SortKey {
                name: "name",
                value: by_name,
            },
            SortKey {
                name: "montant_vente",
                value: by_amount,
            },
        ],
        default_key: "montant_vente",
    };

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "b", amount: Some(10.0) },
            Row { name: "c", amount: None },
            Row { name: "a", amount: Some(30.0) },
        ]
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn key_lookup_ignores_case_but_direction_does_not() {
        let mut data = rows();
        TABLE.resolve(Some("NAME"), Some("asc")).apply(&mut data);
        assert_eq!(names(&data), ["a", "b", "c"]);

        let mut data = rows();
        TABLE.resolve(Some("name"), Some("ASC")).apply(&mut data);
        assert_eq!(names(&data), ["c", "b", "a"]);
    }

    #[test]
    fn unknown_key_falls_back_to_default_descending() {
        let sort = TABLE.resolve(Some("bogus"), Some("asc"));
        assert_eq!(sort.key_name(), Some("montant_vente"));
        assert_eq!(sort.direction(), Direction::Desc);

        let mut data = rows();
        sort.apply(&mut data);
        // при убывании NULL в конце
        assert_eq!(names(&data), ["a", "b", "c"]);
    }

    #[test]
    fn absent_key_uses_default_with_requested_direction() {
        let mut data = rows();
        let sort = TABLE.resolve(None, Some("asc"));
        assert_eq!(sort.direction(), Direction::Asc);
        sort.apply(&mut data);
        assert_eq!(names(&data), ["c", "b", "a"]);
    }

    #[test]
    fn blank_key_sorts_default_descending() {
        for blank in ["", "   "] {
            let sort = TABLE.resolve(Some(blank), Some("asc"));
            assert_eq!(sort.key_name(), Some("montant_vente"));
            assert_eq!(sort.direction(), Direction::Desc);
        }
    }
}
