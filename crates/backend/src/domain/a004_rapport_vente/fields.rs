use chrono::NaiveDateTime;

use super::repository::Model;
use crate::shared::query::{SortKey, SortTable, SortValue, TextField};

pub fn num_vnt(m: &Model) -> Option<&str> {
    Some(m.num_vnt.as_str())
}

pub fn acheteurs(m: &Model) -> Option<&str> {
    m.acheteurs.as_deref()
}

pub fn varietes(m: &Model) -> Option<&str> {
    m.varietes.as_deref()
}

pub fn ref_ach(m: &Model) -> Option<&str> {
    m.ref_ach.as_deref()
}

pub fn cod_type(m: &Model) -> Option<&str> {
    m.cod_type.as_deref()
}

pub fn cod_var(m: &Model) -> Option<&str> {
    m.cod_var.as_deref()
}

pub fn station(m: &Model) -> Option<&str> {
    m.station.as_deref()
}

pub fn date_vente(m: &Model) -> Option<NaiveDateTime> {
    m.date_vente
}

pub const SEARCH_FIELDS: &[TextField<Model>] = &[num_vnt, acheteurs, varietes, ref_ach];

fn sort_num_vnt(m: &Model) -> SortValue<'_> {
    SortValue::Text(Some(&m.num_vnt))
}

fn sort_date_vente(m: &Model) -> SortValue<'_> {
    SortValue::Date(m.date_vente)
}

fn sort_acheteurs(m: &Model) -> SortValue<'_> {
    SortValue::Text(m.acheteurs.as_deref())
}

fn sort_montant_vente(m: &Model) -> SortValue<'_> {
    SortValue::Decimal(m.montant_vente)
}

/// По умолчанию: дата продажи, новые сверху
pub static SORT: SortTable<Model> = SortTable {
    keys: &[
        SortKey { name: "numvnt", value: sort_num_vnt },
        SortKey { name: "date_vente", value: sort_date_vente },
        SortKey { name: "acheteurs", value: sort_acheteurs },
        SortKey { name: "montant_vente", value: sort_montant_vente },
    ],
    default_key: "date_vente",
};
