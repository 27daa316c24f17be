use chrono::NaiveDateTime;

use super::repository::Model;
use crate::shared::query::{SortKey, SortTable, SortValue, TextField};

pub fn nomadh(m: &Model) -> Option<&str> {
    m.nomadh.as_deref()
}

pub fn nomvar(m: &Model) -> Option<&str> {
    m.nomvar.as_deref()
}

pub fn stations(m: &Model) -> Option<&str> {
    m.stations.as_deref()
}

pub fn codvar(m: &Model) -> Option<i64> {
    Some(i64::from(m.codvar))
}

pub fn date_creation(m: &Model) -> Option<NaiveDateTime> {
    Some(m.date_creation)
}

pub const SEARCH_FIELDS: &[TextField<Model>] = &[nomadh, nomvar, stations];

fn sort_nomadh(m: &Model) -> SortValue<'_> {
    SortValue::Text(m.nomadh.as_deref())
}

fn sort_nomvar(m: &Model) -> SortValue<'_> {
    SortValue::Text(m.nomvar.as_deref())
}

fn sort_pdreception(m: &Model) -> SortValue<'_> {
    SortValue::Decimal(Some(m.pd_reception))
}

fn sort_pdcond(m: &Model) -> SortValue<'_> {
    SortValue::Decimal(Some(m.pdcond))
}

fn sort_date_creation(m: &Model) -> SortValue<'_> {
    SortValue::Date(Some(m.date_creation))
}

pub static SORT: SortTable<Model> = SortTable {
    keys: &[
        SortKey { name: "nomadh", value: sort_nomadh },
        SortKey { name: "nomvar", value: sort_nomvar },
        SortKey { name: "pdreception", value: sort_pdreception },
        SortKey { name: "pdcond", value: sort_pdcond },
        SortKey { name: "date_creation", value: sort_date_creation },
    ],
    default_key: "date_creation",
};
