//! Record store: canonical current-period enrollment counts per hub
//!
//! The canonical table is static. Prior periods are synthesized once per
//! [`RecordStore`] through a [`HistoryGenerator`], see [`history`].

pub mod history;

pub use history::{ConstantFactor, HistoryGenerator, UniformVariation};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::DatasetConfig;
use crate::models::Record;

/// Raw input row as supplied by the external data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub hub: String,
    pub absolute_count: f64,
    pub relative_percent: f64,
    pub region: String,
}

impl RawRecord {
    pub fn new(
        hub: impl Into<String>,
        absolute_count: f64,
        relative_percent: f64,
        region: impl Into<String>,
    ) -> Self {
        Self {
            hub: hub.into(),
            absolute_count,
            relative_percent,
            region: region.into(),
        }
    }
}

/// Canonical 2024 enrollment table: (hub, absolute count, relative %, region)
const CANONICAL: &[(&str, f64, f64, &str)] = &[
    ("FORTALEZA", 3833.0, 16.057140463323698, "Metropolitana"),
    ("JAGUARUANA", 531.0, 2.224456453437225, "Jaguaribe"),
    ("CAUCAIA", 487.0, 2.040132378199489, "Metropolitana"),
    ("GUARAMIRANGA", 460.0, 1.927024422939969, "Maciço de Baturité"),
    ("HORIZONTE", 421.0, 1.7636462653428848, "Metropolitana"),
    ("PARACURU", 304.0, 1.2735117925516317, "Litoral Oeste"),
    ("ITAPIPOCA", 296.0, 1.2399983243265889, "Litoral Oeste"),
    ("Baturité", 265.0, 1.1101336349545474, "Maciço de Baturité"),
    ("TABULEIRO DO NORTE", 245.0, 1.0263499643919398, "Baixo Jaguaribe"),
    ("LIMOEIRO DO NORTE", 238.0, 0.9970256796950275, "Baixo Jaguaribe"),
    ("PECÉM", 221.0, 0.9258095597168112, "Metropolitana"),
    ("BOA VIAGEM", 209.0, 0.8755393573792468, "Centro Sul"),
    ("TIANGUÁ", 197.0, 0.8252691550416824, "Ibiapaba"),
    ("UBAJARA", 193.0, 0.8085124209291609, "Ibiapaba"),
    ("MARANGUAPE", 188.0, 0.7875665032885091, "Metropolitana"),
    ("QUIXADÁ", 187.0, 0.7833773197603786, "Sertão Central"),
    ("SOBRAL", 176.0, 0.7372963009509447, "Norte"),
    ("CAMOCIM", 150.0, 0.628377529219555, "Litoral Norte"),
    ("CEDRO", 124.0, 0.5194587574881656, "Centro Sul"),
    ("ORÓS", 117.0, 0.490134472791253, "Sertão Central"),
    ("IGUATÚ", 112.0, 0.46918855515060115, "Centro Sul"),
    ("ACARAÚ", 102.0, 0.4272967198692974, "Litoral Norte"),
    ("CAUCAIA JUREMA", 96.0, 0.4021616187005153, "Metropolitana"),
    ("QUIXERAMOBIM", 93.0, 0.3895940681161242, "Sertão Central"),
    ("CRATEÚS", 90.0, 0.37702651753173305, "Sertão dos Inhamuns"),
    ("ARACATI", 89.0, 0.3728373340036027, "Jaguaribe"),
    ("Umirim", 76.0, 0.31837794813790793, "Litoral Norte"),
    ("JUAZEIRO DO NORTE", 74.0, 0.3099995810816472, "Cariri"),
    ("MARACANAÚ", 73.0, 0.3058103975535168, "Metropolitana"),
    ("MERUOCA", 71.0, 0.2974320304972561, "Norte"),
    ("TAUÁ", 69.0, 0.2890536634409953, "Sertão dos Inhamuns"),
    ("CANINDÉ", 67.0, 0.2806752963847346, "Sertão Central"),
    ("SÃO GONÇALO", 64.0, 0.2681077458003435, "Centro Sul"),
    ("ACOPIARA", 45.0, 0.18851325876586653, "Centro Sul"),
    ("Lavras da Mangabeira", 43.0, 0.18013489170960578, "Cariri"),
    ("JAGUARIBE", 21.0, 0.08797285409073771, "Jaguaribe"),
    ("MORADA NOVA", 20.0, 0.08378367056260735, "Baixo Jaguaribe"),
    ("MADALENA", 17.0, 0.07121611997821625, "Sertão Central"),
    ("Mombaça", 15.0, 0.06283775292195551, "Sertão dos Inhamuns"),
    ("PACAJÚS", 8.0, 0.03351346822504294, "Metropolitana"),
    ("CAMPOS SALES", 5.0, 0.02094591764065184, "Cariri"),
    ("RUSSAS", 5.0, 0.02094591764065184, "Baixo Jaguaribe"),
    ("BARBALHA", 4.0, 0.01675673411252147, "Cariri"),
    ("Beberibe", 4.0, 0.01675673411252147, "Litoral Leste"),
    ("PORTUÁRIO", 4.0, 0.01675673411252147, "Metropolitana"),
    ("MAURITI", 4.0, 0.01675673411252147, "Cariri"),
    ("CRATO", 3.0, 0.012567550584391103, "Cariri"),
    ("FLORIANÓPOLIS", 3.0, 0.012567550584391103, "Especial"),
    ("Aracoiaba", 2.0, 0.008378367056260735, "Maciço de Baturité"),
    ("LAGAMAR", 1.0, 0.0041891835281303675, "Norte"),
];

/// The canonical rows as raw input
pub fn canonical_rows() -> Vec<RawRecord> {
    CANONICAL
        .iter()
        .map(|&(hub, count, percent, region)| RawRecord::new(hub, count, percent, region))
        .collect()
}

/// Immutable set of records across the current and historical periods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStore {
    current_period: i32,
    records: Vec<Record>,
}

impl RecordStore {
    /// Build a store from raw rows for `period`, without history
    pub fn from_raw(rows: &[RawRecord], period: i32) -> Self {
        Self {
            current_period: period,
            records: current_records(rows, period),
        }
    }

    /// Build a store from raw rows and synthesize `history_periods` with `generator`
    ///
    /// Current-period records come first, then each historical period in the
    /// order given.
    pub fn with_history<G: HistoryGenerator + ?Sized>(
        rows: &[RawRecord],
        period: i32,
        history_periods: &[i32],
        generator: &mut G,
    ) -> Self {
        let mut records = current_records(rows, period);
        for &year in history_periods {
            records.extend(generator.generate(rows, year));
        }

        tracing::debug!(
            period,
            history = ?history_periods,
            records = records.len(),
            "Record store built"
        );

        Self {
            current_period: period,
            records,
        }
    }

    /// Canonical dataset with history generated as configured
    ///
    /// A configured seed makes the history reproducible; otherwise it is
    /// drawn from OS entropy.
    pub fn canonical(config: &DatasetConfig) -> Self {
        let mut generator = match config.seed {
            Some(seed) => UniformVariation::seeded(seed, config.variation_min, config.variation_max),
            None => UniformVariation::from_entropy(config.variation_min, config.variation_max),
        };
        Self::with_history(
            &canonical_rows(),
            config.current_period,
            &config.history_periods,
            &mut generator,
        )
    }

    /// Build a store from already materialized records
    pub fn from_records(records: Vec<Record>) -> Self {
        let current_period = records.iter().map(|r| r.period).max().unwrap_or_default();
        Self {
            current_period,
            records,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn current_period(&self) -> i32 {
        self.current_period
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct periods, newest first
    pub fn periods(&self) -> Vec<i32> {
        let periods: BTreeSet<i32> = self.records.iter().map(|r| r.period).collect();
        periods.into_iter().rev().collect()
    }

    /// Distinct regions in order of first appearance
    pub fn regions(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter_map(|r| r.region.as_deref())
            .filter(|region| seen.insert(*region))
            .map(str::to_string)
            .collect()
    }
}

fn current_records(rows: &[RawRecord], period: i32) -> Vec<Record> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            Record::new(
                index,
                row.hub.clone(),
                row.absolute_count,
                row.relative_percent,
                period,
                Some(row.region.clone()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table() {
        let rows = canonical_rows();
        assert_eq!(rows.len(), 50);
        assert_eq!(rows[0].hub, "FORTALEZA");
        assert_eq!(rows[0].absolute_count, 3833.0);

        let total: f64 = rows.iter().map(|r| r.absolute_count).sum();
        assert_eq!(total, 10122.0);
    }

    #[test]
    fn test_from_raw_ids() {
        let store = RecordStore::from_raw(&canonical_rows(), 2024);
        assert_eq!(store.len(), 50);
        assert_eq!(store.records()[0].id, "0_2024");
        assert_eq!(store.records()[49].id, "49_2024");
        assert_eq!(store.periods(), vec![2024]);
    }

    #[test]
    fn test_seeded_history() {
        let config = DatasetConfig {
            seed: Some(42),
            ..DatasetConfig::default()
        };
        let store = RecordStore::canonical(&config);

        assert_eq!(store.len(), 200);
        assert_eq!(store.periods(), vec![2024, 2023, 2022, 2021]);
        assert_eq!(store.current_period(), 2024);

        let again = RecordStore::canonical(&config);
        assert_eq!(store.records(), again.records());
    }

    #[test]
    fn test_regions_first_appearance() {
        let store = RecordStore::from_raw(&canonical_rows(), 2024);
        let regions = store.regions();
        assert_eq!(regions[0], "Metropolitana");
        assert_eq!(regions[1], "Jaguaribe");
        assert!(regions.contains(&"Especial".to_string()));
    }
}
