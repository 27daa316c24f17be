use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Округление до двух знаков, половина от нуля
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `round(numerator / denominator * 100, 2)`, 0 при нулевом знаменателе
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = round2(numerator / denominator * 100.0);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Сумма по заданным значениям; пустой набор даёт 0
pub fn sum<R>(rows: &[R], value: impl Fn(&R) -> Option<f64>) -> f64 {
    rows.iter().filter_map(value).sum()
}

/// Среднее арифметическое, 0 для пустого набора
pub fn average<R>(rows: &[R], value: impl Fn(&R) -> f64) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(value).sum::<f64>() / rows.len() as f64
}

/// Число различных непустых значений
pub fn distinct_count<'a, R, K>(rows: &'a [R], key: impl Fn(&'a R) -> Option<K>) -> usize
where
    K: Eq + Hash,
{
    rows.iter().filter_map(key).collect::<HashSet<_>>().len()
}

pub fn max_of<R, T: Ord>(rows: &[R], value: impl Fn(&R) -> Option<T>) -> Option<T> {
    rows.iter().filter_map(value).max()
}

/// Строки с одним ключом группировки
pub struct Group<'a, K, R> {
    pub key: K,
    pub rows: Vec<&'a R>,
}

/// Группирует строки по ключу в порядке первого появления.
/// `None` в ключе образует отдельную группу; если NULL-ключи
/// нужно пропустить, строки фильтруются заранее.
pub fn group_by<'a, R, K>(rows: &'a [R], key: impl Fn(&'a R) -> K) -> Vec<Group<'a, K, R>>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Group<'a, K, R>> = Vec::new();

    for row in rows {
        let k = key(row);
        match index.get(&k) {
            Some(&i) => groups[i].rows.push(row),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push(Group {
                    key: k,
                    rows: vec![row],
                });
            }
        }
    }

    groups
}

/// Стабильная сортировка по убыванию `metric`, обрезка до `limit`
pub fn rank_desc<T>(mut items: Vec<T>, metric: impl Fn(&T) -> f64, limit: Option<usize>) -> Vec<T> {
    items.sort_by(|a, b| metric(b).total_cmp(&metric(a)));
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
