use contracts::domain::a004_rapport_vente::dto::{
    AveragePriceStat, PriceTimelinePoint, RapportVente, RapportVenteListQuery,
    RapportVenteStatsQuery, VenteAcheteurStat, VenteGlobalStats, VenteStationStat,
    VenteTimelineBucket, VenteVarieteStat,
};
use contracts::shared::api::ListResponse;
use sea_orm::DatabaseConnection;

use super::fields;
use super::repository::{self, Model};
use crate::shared::error::AppResult;
use crate::shared::query::aggregate::{average, distinct_count, group_by, rank_desc, round2, sum};
use crate::shared::query::params::parse_limit;
use crate::shared::query::timeline::bucket;
use crate::shared::query::{Filter, PageRequest, Period};

const DEFAULT_LIMIT: usize = 10;

fn price_or_zero(m: &Model) -> f64 {
    m.prx_kg.unwrap_or(0.0)
}

/// dateFrom, dateTo, codvar и station, общие для всей статистики
fn stats_filter(query: &RapportVenteStatsQuery) -> AppResult<Filter<Model>> {
    Ok(Filter::new()
        .date_range(fields::date_vente, query.date_from.as_deref(), query.date_to.as_deref())?
        .contains_any(fields::cod_var, query.codvar.as_deref())
        .contains_any(fields::station, query.station.as_deref()))
}

async fn load(db: &DatabaseConnection, filter: &Filter<Model>) -> AppResult<Vec<Model>> {
    Ok(filter.apply(repository::list_all(db).await?))
}

/// Отсутствующий или неизвестный период трактуется как неделя
fn period_or_week(value: Option<&str>) -> Period {
    value.and_then(Period::parse).unwrap_or(Period::Week)
}

pub async fn list(
    db: &DatabaseConnection,
    query: &RapportVenteListQuery,
) -> AppResult<ListResponse<RapportVente>> {
    let filter = Filter::new()
        .search(fields::SEARCH_FIELDS, query.search.as_deref())
        .date_range(fields::date_vente, query.date_from.as_deref(), query.date_to.as_deref())?
        .contains_any(fields::station, query.station.as_deref())
        .contains_any(fields::cod_var, query.codvar.as_deref())
        .contains(fields::ref_ach, query.refach.as_deref())
        .contains(fields::cod_type, query.codtype.as_deref());
    let sort = fields::SORT.resolve(query.sort_by.as_deref(), query.sort_order.as_deref());
    let page = PageRequest::from_params(query.page.as_deref(), query.page_size.as_deref())?;

    let mut rows = load(db, &filter).await?;
    sort.apply(&mut rows);
    Ok(page.paginate(rows, RapportVente::from))
}

pub async fn global(db: &DatabaseConnection, query: &RapportVenteStatsQuery) -> AppResult<VenteGlobalStats> {
    let rows = load(db, &stats_filter(query)?).await?;

    Ok(VenteGlobalStats {
        total_ventes: rows.len(),
        poids_total_brut: sum(&rows, |m| m.poid_brut),
        poids_total_pese: sum(&rows, |m| m.poid_pese),
        chiffre_affaires: sum(&rows, |m| m.montant_vente),
        montant_regle: sum(&rows, |m| Some(m.montant_reglement)),
        solde_restant: sum(&rows, |m| m.sold_vente),
        nombre_acheteurs: distinct_count(&rows, |m| m.ref_ach.as_deref()),
        nombre_stations: distinct_count(&rows, |m| m.station.as_deref()),
        nombre_varietes: distinct_count(&rows, |m| m.cod_var.as_deref()),
        prix_moyen_kg: average(&rows, price_or_zero),
    })
}

pub async fn timeline(
    db: &DatabaseConnection,
    query: &RapportVenteStatsQuery,
) -> AppResult<Vec<VenteTimelineBucket>> {
    let filter = stats_filter(query)?;
    let period = period_or_week(query.period.as_deref());
    let rows = load(db, &filter).await?;

    Ok(bucket(&rows, period, |m| m.date_vente)
        .into_iter()
        .map(|b| VenteTimelineBucket {
            total_ventes: b.rows.len(),
            poids_pese: sum(&b.rows, |m| m.poid_pese),
            chiffre_affaires: sum(&b.rows, |m| m.montant_vente),
            montant_regle: sum(&b.rows, |m| Some(m.montant_reglement)),
            period: b.key,
        })
        .collect())
}

pub async fn by_station(
    db: &DatabaseConnection,
    query: &RapportVenteStatsQuery,
) -> AppResult<Vec<VenteStationStat>> {
    let rows = load(db, &stats_filter(query)?).await?;

    let stats = group_by(&rows, |m| m.station.clone())
        .into_iter()
        .filter_map(|g| {
            Some(VenteStationStat {
                total_ventes: g.rows.len(),
                poids_pese: sum(&g.rows, |m| m.poid_pese),
                chiffre_affaires: sum(&g.rows, |m| m.montant_vente),
                montant_regle: sum(&g.rows, |m| Some(m.montant_reglement)),
                solde_restant: sum(&g.rows, |m| m.sold_vente),
                station: g.key?,
            })
        })
        .collect();
    Ok(rank_desc(stats, |s| s.chiffre_affaires, None))
}

pub async fn by_variete(
    db: &DatabaseConnection,
    query: &RapportVenteStatsQuery,
) -> AppResult<Vec<VenteVarieteStat>> {
    let filter = stats_filter(query)?;
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_LIMIT)?;
    let rows = load(db, &filter).await?;

    let stats = group_by(&rows, |m| (m.cod_var.clone(), m.varietes.clone()))
        .into_iter()
        .filter(|g| g.key.0.is_some() || g.key.1.is_some())
        .map(|g| VenteVarieteStat {
            total_ventes: g.rows.len(),
            poids_pese: sum(&g.rows, |m| m.poid_pese),
            chiffre_affaires: sum(&g.rows, |m| m.montant_vente),
            prix_moyen: average(&g.rows, |m| price_or_zero(m)),
            codvar: g.key.0,
            varietes: g.key.1,
        })
        .collect();
    Ok(rank_desc(stats, |s| s.poids_pese, Some(limit)))
}

pub async fn by_acheteur(
    db: &DatabaseConnection,
    query: &RapportVenteStatsQuery,
) -> AppResult<Vec<VenteAcheteurStat>> {
    let filter = stats_filter(query)?;
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_LIMIT)?;
    let rows = load(db, &filter).await?;

    let stats = group_by(&rows, |m| (m.ref_ach.clone(), m.acheteurs.clone()))
        .into_iter()
        .filter(|g| g.key.0.is_some() || g.key.1.is_some())
        .map(|g| VenteAcheteurStat {
            total_ventes: g.rows.len(),
            poids_pese: sum(&g.rows, |m| m.poid_pese),
            chiffre_affaires: sum(&g.rows, |m| m.montant_vente),
            montant_regle: sum(&g.rows, |m| Some(m.montant_reglement)),
            solde_restant: sum(&g.rows, |m| m.sold_vente),
            refach: g.key.0,
            acheteurs: g.key.1,
        })
        .collect();
    Ok(rank_desc(stats, |s| s.chiffre_affaires, Some(limit)))
}

/// Средняя цена по (тип, сорт, код), только строки с ценой
pub async fn average_price(
    db: &DatabaseConnection,
    query: &RapportVenteStatsQuery,
) -> AppResult<Vec<AveragePriceStat>> {
    let rows = load(db, &stats_filter(query)?).await?;
    let priced: Vec<Model> = rows
        .into_iter()
        .filter(|m| m.type_ecart.is_some() && m.varietes.is_some() && m.prx_kg.is_some())
        .collect();

    let stats = group_by(&priced, |m| {
        (m.type_ecart.clone(), m.varietes.clone(), m.cod_var.clone())
    })
    .into_iter()
    .filter_map(|g| {
        let (type_ecart, varietes, codvar) = g.key;
        Some(AveragePriceStat {
            prix_moyen: average(&g.rows, |m| price_or_zero(m)),
            poids_pese: sum(&g.rows, |m| m.poid_pese),
            nombre_ventes: g.rows.len(),
            type_ecart: type_ecart?,
            varietes: varietes?,
            codvar,
        })
    })
    .collect();
    Ok(rank_desc(stats, |s| s.poids_pese, None))
}

pub async fn price_timeline(
    db: &DatabaseConnection,
    query: &RapportVenteStatsQuery,
) -> AppResult<Vec<PriceTimelinePoint>> {
    let filter = stats_filter(query)?;
    let period = period_or_week(query.period.as_deref());
    let rows: Vec<Model> = load(db, &filter)
        .await?
        .into_iter()
        .filter(|m| m.prx_kg.is_some_and(|p| p > 0.0))
        .collect();

    Ok(bucket(&rows, period, |m| m.date_vente)
        .into_iter()
        .map(|b| PriceTimelinePoint {
            prix_moyen: round2(average(&b.rows, |m| price_or_zero(m))),
            period: b.key,
        })
        .collect())
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> AppResult<Option<RapportVente>> {
    Ok(repository::get_by_id(db, id).await?.map(Into::into))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use chrono::{NaiveDate, NaiveDateTime};
    use sea_orm::{ActiveModelTrait, Set};

    fn at(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    struct Sale {
        id: &'static str,
        station: &'static str,
        cod_var: Option<&'static str>,
        acheteur: Option<&'static str>,
        date: Option<NaiveDateTime>,
        poids: f64,
        montant: f64,
        regle: f64,
        prix: Option<f64>,
    }

    async fn seed(db: &DatabaseConnection, s: Sale) {
        repository::ActiveModel {
            id: Set(s.id.to_string()),
            num_vnt: Set(format!("V-{}", s.id)),
            station: Set(Some(s.station.to_string())),
            date_vente: Set(s.date),
            cod_var: Set(s.cod_var.map(str::to_string)),
            varietes: Set(s.cod_var.map(|c| format!("Var {}", c))),
            type_ecart: Set(Some("Ecart I".to_string())),
            ref_ach: Set(s.acheteur.map(str::to_string)),
            acheteurs: Set(s.acheteur.map(|a| format!("Acheteur {}", a))),
            poid_pese: Set(Some(s.poids)),
            prx_kg: Set(s.prix),
            montant_vente: Set(Some(s.montant)),
            montant_reglement: Set(s.regle),
            sold_vente: Set(Some(s.montant - s.regle)),
            date_creation: Set(at(1, 1)),
            date_mise_a_jour: Set(at(1, 1)),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn fixture() -> DatabaseConnection {
        let db = connect_in_memory().await.unwrap();
        seed(&db, Sale { id: "1", station: "zaouia", cod_var: Some("101"), acheteur: Some("A1"), date: Some(at(1, 6)), poids: 100.0, montant: 300.0, regle: 300.0, prix: Some(3.0) }).await;
        seed(&db, Sale { id: "2", station: "zaouia", cod_var: Some("102"), acheteur: Some("A2"), date: Some(at(1, 7)), poids: 50.0, montant: 100.0, regle: 0.0, prix: Some(2.0) }).await;
        seed(&db, Sale { id: "3", station: "berkane", cod_var: Some("101"), acheteur: Some("A1"), date: Some(at(2, 14)), poids: 200.0, montant: 500.0, regle: 250.0, prix: Some(2.5) }).await;
        seed(&db, Sale { id: "4", station: "other", cod_var: None, acheteur: None, date: None, poids: 10.0, montant: 0.0, regle: 0.0, prix: None }).await;
        db
    }

    #[tokio::test]
    async fn list_filters_multi_value_station() {
        let db = fixture().await;
        let query = RapportVenteListQuery {
            station: Some("zaouia, berk".to_string()),
            sort_by: Some("montant_vente".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let page = list(&db, &query).await.unwrap();
        assert_eq!(page.total_count, 3);
        let ids: Vec<&str> = page.data.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["2", "1", "3"]);

        let query = RapportVenteListQuery {
            station: Some(",".to_string()),
            ..Default::default()
        };
        assert_eq!(list(&db, &query).await.unwrap().total_count, 4);
    }

    #[tokio::test]
    async fn global_stats_and_empty_set() {
        let db = fixture().await;
        let stats = global(&db, &RapportVenteStatsQuery::default()).await.unwrap();
        assert_eq!(stats.total_ventes, 4);
        assert_eq!(stats.chiffre_affaires, 900.0);
        assert_eq!(stats.montant_regle, 550.0);
        assert_eq!(stats.solde_restant, 350.0);
        assert_eq!(stats.nombre_acheteurs, 2);
        assert_eq!(stats.nombre_stations, 3);
        assert_eq!(stats.nombre_varietes, 2);
        // строка без цены считается как 0
        assert_eq!(stats.prix_moyen_kg, 1.875);

        let query = RapportVenteStatsQuery {
            station: Some("nowhere".to_string()),
            ..Default::default()
        };
        let empty = global(&db, &query).await.unwrap();
        assert_eq!(empty.total_ventes, 0);
        assert_eq!(empty.chiffre_affaires, 0.0);
        assert_eq!(empty.prix_moyen_kg, 0.0);
    }

    #[tokio::test]
    async fn timeline_falls_back_to_weeks() {
        let db = fixture().await;
        let query = RapportVenteStatsQuery {
            period: Some("fortnight".to_string()),
            ..Default::default()
        };
        let buckets = timeline(&db, &query).await.unwrap();
        let labels: Vec<&str> = buckets.iter().map(|b| b.period.as_str()).collect();
        // 2025-01-06 и 2025-01-07 в одной ISO-неделе 2
        assert_eq!(labels, ["2025-W02", "2025-W07"]);
        assert_eq!(buckets[0].total_ventes, 2);
        assert_eq!(buckets[0].chiffre_affaires, 400.0);
    }

    #[tokio::test]
    async fn rankings_and_price_views() {
        let db = fixture().await;
        let query = RapportVenteStatsQuery::default();

        let varietes = by_variete(&db, &query).await.unwrap();
        assert_eq!(varietes.len(), 2);
        assert_eq!(varietes[0].codvar.as_deref(), Some("101"));
        assert_eq!(varietes[0].poids_pese, 300.0);
        assert_eq!(varietes[0].prix_moyen, 2.75);

        let acheteurs = by_acheteur(&db, &query).await.unwrap();
        assert_eq!(acheteurs[0].refach.as_deref(), Some("A1"));
        assert_eq!(acheteurs[0].solde_restant, 250.0);

        let stations = by_station(&db, &query).await.unwrap();
        assert_eq!(stations[0].station, "berkane");
        assert_eq!(stations.len(), 3);

        let prices = average_price(&db, &query).await.unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].nombre_ventes, 2);

        let monthly = RapportVenteStatsQuery {
            period: Some("Month".to_string()),
            ..Default::default()
        };
        let points = price_timeline(&db, &monthly).await.unwrap();
        assert_eq!(
            points,
            vec![
                PriceTimelinePoint { period: "2025-01".to_string(), prix_moyen: 2.5 },
                PriceTimelinePoint { period: "2025-02".to_string(), prix_moyen: 2.5 },
            ]
        );
    }
}
