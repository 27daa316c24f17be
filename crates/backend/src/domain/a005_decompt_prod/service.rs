use contracts::domain::a005_decompt_prod::dto::{
    CategoryValue, DecomptAdherentStat, DecomptGlobalStats, DecomptProd, DecomptProdListQuery,
    DecomptProdStatsQuery, DecomptStationStat, DecomptVarieteStat, ExportCategoriesStats,
    RendementStats,
};
use contracts::shared::api::ListResponse;
use sea_orm::DatabaseConnection;

use super::fields;
use super::repository::{self, Model};
use crate::shared::error::AppResult;
use crate::shared::query::aggregate::{distinct_count, group_by, rank_desc, ratio};
use crate::shared::query::params::parse_limit;
use crate::shared::query::{Filter, PageRequest};

const DEFAULT_LIMIT: usize = 10;

/// Суммарные веса по группе строк
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Volumes {
    reception: f64,
    cond: f64,
    cat_i: f64,
    cat_ii: f64,
    ecart: f64,
    freinte: f64,
}

impl Volumes {
    fn of<'a>(rows: impl IntoIterator<Item = &'a Model>) -> Self {
        rows.into_iter().fold(Self::default(), |acc, m| Self {
            reception: acc.reception + m.pd_reception,
            cond: acc.cond + m.pdcond,
            cat_i: acc.cat_i + m.exp_cat_i,
            cat_ii: acc.cat_ii + m.exp_cat_ii,
            ecart: acc.ecart + m.pd_ecart,
            freinte: acc.freinte + m.freinte,
        })
    }

    /// Вес после кондиционирования к весу приёмки
    fn rendement(&self) -> f64 {
        ratio(self.cond, self.reception)
    }
}

/// dateFrom, dateTo, точный codvar и список station
fn stats_filter(query: &DecomptProdStatsQuery) -> AppResult<Filter<Model>> {
    Ok(Filter::new()
        .date_range(fields::date_creation, query.date_from.as_deref(), query.date_to.as_deref())?
        .equals_int("codvar", fields::codvar, query.codvar.as_deref())?
        .contains_any(fields::stations, query.station.as_deref()))
}

async fn load(db: &DatabaseConnection, filter: &Filter<Model>) -> AppResult<Vec<Model>> {
    Ok(filter.apply(repository::list_all(db).await?))
}

pub async fn list(
    db: &DatabaseConnection,
    query: &DecomptProdListQuery,
) -> AppResult<ListResponse<DecomptProd>> {
    let filter = Filter::new()
        .search(fields::SEARCH_FIELDS, query.search.as_deref())
        .date_range(fields::date_creation, query.date_from.as_deref(), query.date_to.as_deref())?
        .contains_any(fields::stations, query.station.as_deref())
        .equals_int("codvar", fields::codvar, query.codvar.as_deref())?
        .contains(fields::nomadh, query.nomadh.as_deref());
    let sort = fields::SORT.resolve(query.sort_by.as_deref(), query.sort_order.as_deref());
    let page = PageRequest::from_params(query.page.as_deref(), query.page_size.as_deref())?;

    let mut rows = load(db, &filter).await?;
    sort.apply(&mut rows);
    Ok(page.paginate(rows, DecomptProd::from))
}

pub async fn global(db: &DatabaseConnection, query: &DecomptProdStatsQuery) -> AppResult<DecomptGlobalStats> {
    let rows = load(db, &stats_filter(query)?).await?;
    let v = Volumes::of(&rows);

    Ok(DecomptGlobalStats {
        total_enregistrements: rows.len(),
        poids_reception_total: v.reception,
        poids_cond_total: v.cond,
        export_cat_i_total: v.cat_i,
        export_cat_ii_total: v.cat_ii,
        poids_ecart_total: v.ecart,
        freinte_total: v.freinte,
        nombre_adherents: distinct_count(&rows, |m| m.nomadh.as_deref()),
        nombre_varietes: distinct_count(&rows, |m| Some(m.codvar)),
        nombre_stations: distinct_count(&rows, |m| m.stations.as_deref()),
        taux_rendement: v.rendement(),
        taux_freinte: ratio(v.freinte, v.reception),
    })
}

pub async fn by_adherent(
    db: &DatabaseConnection,
    query: &DecomptProdStatsQuery,
) -> AppResult<Vec<DecomptAdherentStat>> {
    let filter = stats_filter(query)?;
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_LIMIT)?;
    let rows = load(db, &filter).await?;

    let stats = group_by(&rows, |m| m.nomadh.clone().map(|n| (m.refver, n)))
        .into_iter()
        .filter_map(|g| {
            let (refver, nomadh) = g.key?;
            let v = Volumes::of(g.rows.iter().copied());
            Some(DecomptAdherentStat {
                refver,
                nomadh,
                total_enregistrements: g.rows.len(),
                poids_reception: v.reception,
                poids_cond: v.cond,
                export_cat_i: v.cat_i,
                export_cat_ii: v.cat_ii,
                poids_ecart: v.ecart,
                freinte: v.freinte,
                taux_rendement: v.rendement(),
            })
        })
        .collect();
    Ok(rank_desc(stats, |s| s.poids_reception, Some(limit)))
}

pub async fn by_variete(
    db: &DatabaseConnection,
    query: &DecomptProdStatsQuery,
) -> AppResult<Vec<DecomptVarieteStat>> {
    let filter = stats_filter(query)?;
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_LIMIT)?;
    let rows = load(db, &filter).await?;

    let stats = group_by(&rows, |m| m.nomvar.clone().map(|n| (m.codvar, n)))
        .into_iter()
        .filter_map(|g| {
            let (codvar, nomvar) = g.key?;
            let v = Volumes::of(g.rows.iter().copied());
            Some(DecomptVarieteStat {
                codvar,
                nomvar,
                total_enregistrements: g.rows.len(),
                poids_reception: v.reception,
                poids_cond: v.cond,
                export_cat_i: v.cat_i,
                export_cat_ii: v.cat_ii,
                poids_ecart: v.ecart,
                freinte: v.freinte,
                taux_rendement: v.rendement(),
                taux_export_cat_i: ratio(v.cat_i, v.cond),
            })
        })
        .collect();
    Ok(rank_desc(stats, |s| s.poids_reception, Some(limit)))
}

pub async fn by_station(
    db: &DatabaseConnection,
    query: &DecomptProdStatsQuery,
) -> AppResult<Vec<DecomptStationStat>> {
    let rows = load(db, &stats_filter(query)?).await?;

    let stats = group_by(&rows, |m| m.stations.clone())
        .into_iter()
        .filter_map(|g| {
            let station = g.key?;
            let v = Volumes::of(g.rows.iter().copied());
            Some(DecomptStationStat {
                station,
                total_enregistrements: g.rows.len(),
                poids_reception: v.reception,
                poids_cond: v.cond,
                export_cat_i: v.cat_i,
                export_cat_ii: v.cat_ii,
                poids_ecart: v.ecart,
                freinte: v.freinte,
                nombre_adherents: distinct_count(&g.rows, |m| m.nomadh.as_deref()),
                taux_rendement: v.rendement(),
            })
        })
        .collect();
    Ok(rank_desc(stats, |s| s.poids_reception, None))
}

/// Потери считаются от веса приёмки, экспортные категории
/// от веса после кондиционирования.
pub async fn rendement(db: &DatabaseConnection, query: &DecomptProdStatsQuery) -> AppResult<RendementStats> {
    let rows = load(db, &stats_filter(query)?).await?;
    let v = Volumes::of(&rows);

    Ok(RendementStats {
        taux_rendement_global: v.rendement(),
        taux_freinte_global: ratio(v.freinte, v.reception),
        taux_ecart_global: ratio(v.ecart, v.reception),
        taux_export_cat_i: ratio(v.cat_i, v.cond),
        taux_export_cat_ii: ratio(v.cat_ii, v.cond),
        poids_reception_total: v.reception,
        poids_cond_total: v.cond,
        freinte_total: v.freinte,
        ecart_total: v.ecart,
    })
}

pub async fn export_categories(
    db: &DatabaseConnection,
    query: &DecomptProdStatsQuery,
) -> AppResult<ExportCategoriesStats> {
    let rows = load(db, &stats_filter(query)?).await?;
    let v = Volumes::of(&rows);

    let categories = [
        ("Export Cat I", v.cat_i),
        ("Export Cat II", v.cat_ii),
        ("Écart", v.ecart),
        ("Freinte", v.freinte),
    ]
    .into_iter()
    .map(|(name, value)| CategoryValue {
        name: name.to_string(),
        value,
    })
    .collect();

    Ok(ExportCategoriesStats {
        categories,
        total: v.reception,
    })
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> AppResult<Option<DecomptProd>> {
    Ok(repository::get_by_id(db, id).await?.map(Into::into))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::error::AppError;
    use chrono::NaiveDate;
    use sea_orm::{ActiveModelTrait, Set};

    async fn seed(
        db: &DatabaseConnection,
        id: &str,
        (refver, nomadh): (i32, &str),
        codvar: i32,
        station: &str,
        reception: f64,
        cond: f64,
    ) {
        repository::ActiveModel {
            id: Set(id.to_string()),
            refver: Set(refver),
            nomadh: Set(Some(nomadh.to_string())),
            codvar: Set(codvar),
            nomvar: Set(Some(format!("Variete {}", codvar))),
            pd_reception: Set(reception),
            pdcond: Set(cond),
            exp_cat_i: Set(cond / 2.0),
            exp_cat_ii: Set(cond / 4.0),
            pd_ecart: Set(reception / 10.0),
            freinte: Set(reception / 20.0),
            stations: Set(Some(station.to_string())),
            date_creation: Set(NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()),
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn fixture() -> DatabaseConnection {
        let db = connect_in_memory().await.unwrap();
        seed(&db, "1", (10, "Ahmed"), 1, "zaouia", 1000.0, 800.0).await;
        seed(&db, "2", (10, "Ahmed"), 2, "zaouia", 500.0, 300.0).await;
        seed(&db, "3", (20, "Fatima"), 1, "berkane", 2000.0, 1000.0).await;
        db
    }

    #[tokio::test]
    async fn global_ratios_are_rounded_percentages() {
        let db = fixture().await;
        let stats = global(&db, &DecomptProdStatsQuery::default()).await.unwrap();
        assert_eq!(stats.total_enregistrements, 3);
        assert_eq!(stats.poids_reception_total, 3500.0);
        assert_eq!(stats.poids_cond_total, 2100.0);
        assert_eq!(stats.nombre_adherents, 2);
        assert_eq!(stats.nombre_varietes, 2);
        assert_eq!(stats.nombre_stations, 2);
        assert_eq!(stats.taux_rendement, 60.0);
        assert_eq!(stats.taux_freinte, 5.0);
    }

    #[tokio::test]
    async fn empty_selection_yields_zero_ratios() {
        let db = fixture().await;
        let query = DecomptProdStatsQuery {
            station: Some("nowhere".to_string()),
            ..Default::default()
        };
        let r = rendement(&db, &query).await.unwrap();
        assert_eq!(r.taux_rendement_global, 0.0);
        assert_eq!(r.taux_export_cat_i, 0.0);
        assert_eq!(r.poids_reception_total, 0.0);

        let categories = export_categories(&db, &query).await.unwrap();
        assert_eq!(categories.categories.len(), 4);
        assert!(categories.categories.iter().all(|c| c.value == 0.0));
        assert_eq!(categories.total, 0.0);
    }

    #[tokio::test]
    async fn codvar_filter_is_exact_and_validated() {
        let db = fixture().await;
        let query = DecomptProdStatsQuery {
            codvar: Some("1".to_string()),
            ..Default::default()
        };
        let varietes = by_variete(&db, &query).await.unwrap();
        assert_eq!(varietes.len(), 1);
        assert_eq!(varietes[0].poids_reception, 3000.0);
        assert_eq!(varietes[0].taux_export_cat_i, 50.0);

        let bad = DecomptProdStatsQuery {
            codvar: Some("one".to_string()),
            ..Default::default()
        };
        assert!(matches!(global(&db, &bad).await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn groupings_rank_by_received_weight() {
        let db = fixture().await;
        let query = DecomptProdStatsQuery::default();

        let adherents = by_adherent(&db, &query).await.unwrap();
        assert_eq!(adherents[0].nomadh, "Fatima");
        assert_eq!(adherents[1].total_enregistrements, 2);
        assert_eq!(adherents[1].taux_rendement, 73.33);

        let stations = by_station(&db, &query).await.unwrap();
        assert_eq!(stations[0].station, "berkane");
        assert_eq!(stations[1].nombre_adherents, 1);
    }

    #[tokio::test]
    async fn list_sorts_and_searches() {
        let db = fixture().await;
        let query = DecomptProdListQuery {
            search: Some("Ahm".to_string()),
            sort_by: Some("PDRECEPTION".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let page = list(&db, &query).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.data[0].id, "2");
    }
}
