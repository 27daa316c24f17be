//! Аксессоры колонок `dossier_export` для конвейера запросов

use chrono::NaiveDateTime;

use super::repository::Model;
use crate::shared::query::{SortKey, SortTable, SortValue, TextField};

pub fn numdos(m: &Model) -> Option<&str> {
    Some(m.numdos.as_str())
}

pub fn numtc(m: &Model) -> Option<&str> {
    m.numtc.as_deref()
}

pub fn navire(m: &Model) -> Option<&str> {
    m.navire.as_deref()
}

pub fn codpay(m: &Model) -> Option<&str> {
    m.codpay.as_deref()
}

pub fn stations(m: &Model) -> Option<&str> {
    m.stations.as_deref()
}

pub fn rsclient(m: &Model) -> Option<&str> {
    m.rsclient.as_deref()
}

pub fn codvar(m: &Model) -> Option<&str> {
    m.codvar.as_deref()
}

pub fn refexp(m: &Model) -> Option<&str> {
    m.refexp.as_deref()
}

pub fn exporter(m: &Model) -> Option<&str> {
    m.exporter.as_deref()
}

pub fn dtedep(m: &Model) -> Option<NaiveDateTime> {
    m.dtedep
}

/// Поля свободного поиска `search`
pub const SEARCH_FIELDS: &[TextField<Model>] = &[numdos, numtc, refexp, exporter, navire, rsclient];

fn sort_dtedep(m: &Model) -> SortValue<'_> {
    SortValue::Date(m.dtedep)
}

fn sort_numdos(m: &Model) -> SortValue<'_> {
    SortValue::Text(Some(&m.numdos))
}

fn sort_navire(m: &Model) -> SortValue<'_> {
    SortValue::Text(m.navire.as_deref())
}

fn sort_nompay(m: &Model) -> SortValue<'_> {
    SortValue::Text(m.nompay.as_deref())
}

pub static SORT: SortTable<Model> = SortTable {
    keys: &[
        SortKey { name: "dtedep", value: sort_dtedep },
        SortKey { name: "numdos", value: sort_numdos },
        SortKey { name: "navire", value: sort_navire },
        SortKey { name: "nompay", value: sort_nompay },
    ],
    default_key: "dtedep",
};
