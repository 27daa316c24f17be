pub mod a001_stock;
pub mod a002_reception;
pub mod a003_dossier_export;
pub mod a004_rapport_vente;
pub mod a005_decompt_prod;
