use contracts::domain::a003_dossier_export::dto::{
    DossierClientStat, DossierCountryStat, DossierExport, DossierExportListQuery,
    DossierExportStats, DossierExportStatsQuery, DossierNavireStat, DossierProductStat,
    DossierStationStat, DossierTimelineBucket,
};
use contracts::shared::api::ListResponse;
use sea_orm::DatabaseConnection;

use super::fields;
use super::repository::{self, Model};
use crate::shared::error::AppResult;
use crate::shared::query::aggregate::{distinct_count, group_by, max_of, rank_desc, sum};
use crate::shared::query::params::parse_limit;
use crate::shared::query::timeline::bucket;
use crate::shared::query::{Filter, PageRequest, Period};

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_PERIOD: &str = "month";

/// Метрики одной группы досье
struct Totals {
    dossiers: usize,
    palettes: f64,
    colis: f64,
    poids: f64,
}

fn totals(rows: &[&Model]) -> Totals {
    Totals {
        dossiers: distinct_count(rows, |m| Some(m.numdos.as_str())),
        palettes: sum(rows, |m| m.nbrpal),
        colis: sum(rows, |m| m.nbrcol),
        poids: sum(rows, |m| m.pdscom),
    }
}

/// dateFrom/dateTo по дате отправки
fn departure_filter(date_from: Option<&str>, date_to: Option<&str>) -> AppResult<Filter<Model>> {
    Filter::new().date_range(fields::dtedep, date_from, date_to)
}

async fn load(db: &DatabaseConnection, filter: &Filter<Model>) -> AppResult<Vec<Model>> {
    Ok(filter.apply(repository::list_all(db).await?))
}

pub async fn list(
    db: &DatabaseConnection,
    query: &DossierExportListQuery,
) -> AppResult<ListResponse<DossierExport>> {
    let filter = departure_filter(query.date_from.as_deref(), query.date_to.as_deref())?
        .contains(fields::navire, query.navire.as_deref())
        .contains(fields::codpay, query.codpay.as_deref())
        .contains(fields::stations, query.station.as_deref())
        .contains(fields::rsclient, query.rsclient.as_deref())
        .contains(fields::codvar, query.codvar.as_deref())
        .contains(fields::refexp, query.refexp.as_deref())
        .contains(fields::exporter, query.exporter.as_deref())
        .search(fields::SEARCH_FIELDS, query.search.as_deref());
    let sort = fields::SORT.resolve(query.sort_by.as_deref(), query.sort_order.as_deref());
    let page = PageRequest::from_params(query.page.as_deref(), query.page_size.as_deref())?;

    let mut rows = load(db, &filter).await?;
    sort.apply(&mut rows);
    Ok(page.paginate(rows, DossierExport::from))
}

pub async fn stats(db: &DatabaseConnection, query: &DossierExportStatsQuery) -> AppResult<DossierExportStats> {
    let filter = departure_filter(query.date_from.as_deref(), query.date_to.as_deref())?
        .contains(fields::stations, query.station.as_deref());
    let rows = load(db, &filter).await?;
    let refs: Vec<&Model> = rows.iter().collect();
    let t = totals(&refs);

    Ok(DossierExportStats {
        total_dossiers: t.dossiers,
        total_palettes: t.palettes,
        total_colis: t.colis,
        total_poids: t.poids,
        navire_count: distinct_count(&rows, |m| m.navire.as_deref()),
        pays_count: distinct_count(&rows, |m| m.codpay.as_deref()),
        clients_count: distinct_count(&rows, |m| m.rsclient.as_deref()),
        last_export_date: max_of(&rows, |m| m.dtedep),
    })
}

/// Группировка по дате отправки. Неизвестный период даёт пустой список.
pub async fn timeline(
    db: &DatabaseConnection,
    query: &DossierExportStatsQuery,
) -> AppResult<Vec<DossierTimelineBucket>> {
    let filter = departure_filter(query.date_from.as_deref(), query.date_to.as_deref())?;
    let period = query.period.as_deref().unwrap_or(DEFAULT_PERIOD);
    let Some(period) = Period::parse(period) else {
        return Ok(Vec::new());
    };

    let rows = load(db, &filter).await?;
    Ok(bucket(&rows, period, |m| m.dtedep)
        .into_iter()
        .map(|b| {
            let t = totals(&b.rows);
            DossierTimelineBucket {
                period: b.key,
                total_dossiers: t.dossiers,
                total_palettes: t.palettes,
                total_colis: t.colis,
                total_poids: t.poids,
            }
        })
        .collect())
}

pub async fn by_country(
    db: &DatabaseConnection,
    query: &DossierExportStatsQuery,
) -> AppResult<Vec<DossierCountryStat>> {
    let filter = departure_filter(query.date_from.as_deref(), query.date_to.as_deref())?;
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_LIMIT)?;
    let rows = load(db, &filter).await?;

    let stats = group_by(&rows, |m| m.codpay.clone().map(|c| (c, m.nompay.clone())))
        .into_iter()
        .filter_map(|g| {
            let (codpay, nompay) = g.key?;
            let t = totals(&g.rows);
            Some(DossierCountryStat {
                codpay,
                nompay,
                total_dossiers: t.dossiers,
                total_palettes: t.palettes,
                total_colis: t.colis,
                total_poids: t.poids,
            })
        })
        .collect();
    Ok(rank_desc(stats, |s| s.total_poids, Some(limit)))
}

pub async fn by_product(
    db: &DatabaseConnection,
    query: &DossierExportStatsQuery,
) -> AppResult<Vec<DossierProductStat>> {
    let filter = departure_filter(query.date_from.as_deref(), query.date_to.as_deref())?;
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_LIMIT)?;
    let rows = load(db, &filter).await?;

    let stats = group_by(&rows, |m| m.codvar.clone().map(|c| (c, m.produit.clone())))
        .into_iter()
        .filter_map(|g| {
            let (codvar, produit) = g.key?;
            let t = totals(&g.rows);
            Some(DossierProductStat {
                codvar,
                produit,
                total_dossiers: t.dossiers,
                total_palettes: t.palettes,
                total_colis: t.colis,
                total_poids: t.poids,
            })
        })
        .collect();
    Ok(rank_desc(stats, |s| s.total_poids, Some(limit)))
}

/// Суда, последняя отправка первой
pub async fn by_navire(
    db: &DatabaseConnection,
    query: &DossierExportStatsQuery,
) -> AppResult<Vec<DossierNavireStat>> {
    let filter = departure_filter(query.date_from.as_deref(), query.date_to.as_deref())?;
    let rows = load(db, &filter).await?;

    let mut stats: Vec<DossierNavireStat> = group_by(&rows, |m| m.navire.clone())
        .into_iter()
        .filter_map(|g| {
            let navire = g.key?;
            let t = totals(&g.rows);
            Some(DossierNavireStat {
                navire,
                total_dossiers: t.dossiers,
                total_palettes: t.palettes,
                total_poids: t.poids,
                last_departure: max_of(&g.rows, |m| m.dtedep),
            })
        })
        .collect();
    stats.sort_by(|a, b| b.last_departure.cmp(&a.last_departure));
    Ok(stats)
}

pub async fn by_station(
    db: &DatabaseConnection,
    query: &DossierExportStatsQuery,
) -> AppResult<Vec<DossierStationStat>> {
    let filter = departure_filter(query.date_from.as_deref(), query.date_to.as_deref())?;
    let rows = load(db, &filter).await?;

    let stats = group_by(&rows, |m| m.stations.clone())
        .into_iter()
        .filter_map(|g| {
            let station = g.key?;
            let t = totals(&g.rows);
            Some(DossierStationStat {
                station,
                total_dossiers: t.dossiers,
                total_palettes: t.palettes,
                total_colis: t.colis,
                total_poids: t.poids,
            })
        })
        .collect();
    Ok(rank_desc(stats, |s| s.total_poids, None))
}

pub async fn by_client(
    db: &DatabaseConnection,
    query: &DossierExportStatsQuery,
) -> AppResult<Vec<DossierClientStat>> {
    let filter = departure_filter(query.date_from.as_deref(), query.date_to.as_deref())?;
    let limit = parse_limit(query.limit.as_deref(), DEFAULT_LIMIT)?;
    let rows = load(db, &filter).await?;

    let stats = group_by(&rows, |m| m.rsclient.clone())
        .into_iter()
        .filter_map(|g| {
            let client = g.key?;
            let t = totals(&g.rows);
            Some(DossierClientStat {
                rsclient: client.clone(),
                client,
                total_dossiers: t.dossiers,
                total_palettes: t.palettes,
                total_colis: t.colis,
                total_poids: t.poids,
            })
        })
        .collect();
    Ok(rank_desc(stats, |s| s.total_poids, Some(limit)))
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> AppResult<Option<DossierExport>> {
    Ok(repository::get_by_id(db, id).await?.map(Into::into))
}
