//! Closed metric families recovered from the survey workbook header row.
//!
//! Every family is a fixed, ordered key list with a display label per key.
//! The labels double as the exact header texts the ingestion parser matches
//! against, so they must never be reworded.

use serde::{Deserialize, Serialize};

/// One of the four closed metric families carried on every brand record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    Funnel,
    Timeline,
    BrandPower,
    FuturePower,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 4] = [
        MetricFamily::Funnel,
        MetricFamily::Timeline,
        MetricFamily::BrandPower,
        MetricFamily::FuturePower,
    ];

    /// Keys of this family in display order.
    #[must_use]
    pub fn keys(self) -> &'static [MetricKey] {
        match self {
            MetricFamily::Funnel => &FUNNEL_KEYS,
            MetricFamily::Timeline => &TIMELINE_KEYS,
            MetricFamily::BrandPower => &BRAND_POWER_KEYS,
            MetricFamily::FuturePower => &FUTURE_POWER_KEYS,
        }
    }
}

impl std::fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricFamily::Funnel => write!(f, "funnel"),
            MetricFamily::Timeline => write!(f, "timeline"),
            MetricFamily::BrandPower => write!(f, "brand_power"),
            MetricFamily::FuturePower => write!(f, "future_power"),
        }
    }
}

/// A single named field in one of the closed metric families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "FT")]
    Ft,
    #[serde(rename = "FW")]
    Fw,
    #[serde(rename = "FZ")]
    Fz,
    #[serde(rename = "GC")]
    Gc,
    #[serde(rename = "GJ")]
    Gj,
    #[serde(rename = "GL")]
    Gl,
    T1,
    T2,
    T3,
    T4,
    T5,
    #[serde(rename = "BP1")]
    Bp1,
    #[serde(rename = "BP2")]
    Bp2,
    #[serde(rename = "BP3")]
    Bp3,
    #[serde(rename = "BP4")]
    Bp4,
    #[serde(rename = "FP1")]
    Fp1,
    #[serde(rename = "FP2")]
    Fp2,
    #[serde(rename = "FP3")]
    Fp3,
    #[serde(rename = "FP4")]
    Fp4,
    #[serde(rename = "FP5")]
    Fp5,
    #[serde(rename = "FP6")]
    Fp6,
}

pub const FUNNEL_KEYS: [MetricKey; 6] = [
    MetricKey::Ft,
    MetricKey::Fw,
    MetricKey::Fz,
    MetricKey::Gc,
    MetricKey::Gj,
    MetricKey::Gl,
];

pub const TIMELINE_KEYS: [MetricKey; 5] = [
    MetricKey::T1,
    MetricKey::T2,
    MetricKey::T3,
    MetricKey::T4,
    MetricKey::T5,
];

pub const BRAND_POWER_KEYS: [MetricKey; 4] = [
    MetricKey::Bp1,
    MetricKey::Bp2,
    MetricKey::Bp3,
    MetricKey::Bp4,
];

pub const FUTURE_POWER_KEYS: [MetricKey; 6] = [
    MetricKey::Fp1,
    MetricKey::Fp2,
    MetricKey::Fp3,
    MetricKey::Fp4,
    MetricKey::Fp5,
    MetricKey::Fp6,
];

impl MetricKey {
    /// Every key across all four families, family by family.
    pub fn all() -> impl Iterator<Item = MetricKey> {
        MetricFamily::ALL
            .into_iter()
            .flat_map(|family| family.keys().iter().copied())
    }

    /// Short stable code used as the item key in selections, e.g. `"FT"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            MetricKey::Ft => "FT",
            MetricKey::Fw => "FW",
            MetricKey::Fz => "FZ",
            MetricKey::Gc => "GC",
            MetricKey::Gj => "GJ",
            MetricKey::Gl => "GL",
            MetricKey::T1 => "T1",
            MetricKey::T2 => "T2",
            MetricKey::T3 => "T3",
            MetricKey::T4 => "T4",
            MetricKey::T5 => "T5",
            MetricKey::Bp1 => "BP1",
            MetricKey::Bp2 => "BP2",
            MetricKey::Bp3 => "BP3",
            MetricKey::Bp4 => "BP4",
            MetricKey::Fp1 => "FP1",
            MetricKey::Fp2 => "FP2",
            MetricKey::Fp3 => "FP3",
            MetricKey::Fp4 => "FP4",
            MetricKey::Fp5 => "FP5",
            MetricKey::Fp6 => "FP6",
        }
    }

    /// Display label; identical to the workbook header text for this key.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MetricKey::Ft => "認知あり(TOP2)",
            MetricKey::Fw => "興味あり(TOP2)",
            MetricKey::Fz => "好意あり(TOP2)",
            MetricKey::Gc => "購入・利用意向あり(TOP2)",
            MetricKey::Gj => "購入・利用経験あり(TOP5)",
            MetricKey::Gl => "リピート意向あり(TOP2)",
            MetricKey::T1 => "直近1ヶ月以内に購入・利用した",
            MetricKey::T2 => "過去2～3ヶ月以内に購入・利用した",
            MetricKey::T3 => "過去4ヶ月～半年未満に購入・利用した",
            MetricKey::T4 => "半年～1年未満に購入・利用した",
            MetricKey::T5 => "1年以上前に購入・利用した",
            MetricKey::Bp1 => "詳細認知",
            MetricKey::Bp2 => "知覚品質",
            MetricKey::Bp3 => "ロイヤリティ",
            MetricKey::Bp4 => "話題性",
            MetricKey::Fp1 => "目的意識",
            MetricKey::Fp2 => "社会との向き合い",
            MetricKey::Fp3 => "顧客理解力",
            MetricKey::Fp4 => "双方向コミュニケーション",
            MetricKey::Fp5 => "技術開発力",
            MetricKey::Fp6 => "自己実現サポート",
        }
    }

    #[must_use]
    pub fn family(self) -> MetricFamily {
        match self {
            MetricKey::Ft
            | MetricKey::Fw
            | MetricKey::Fz
            | MetricKey::Gc
            | MetricKey::Gj
            | MetricKey::Gl => MetricFamily::Funnel,
            MetricKey::T1 | MetricKey::T2 | MetricKey::T3 | MetricKey::T4 | MetricKey::T5 => {
                MetricFamily::Timeline
            }
            MetricKey::Bp1 | MetricKey::Bp2 | MetricKey::Bp3 | MetricKey::Bp4 => {
                MetricFamily::BrandPower
            }
            MetricKey::Fp1
            | MetricKey::Fp2
            | MetricKey::Fp3
            | MetricKey::Fp4
            | MetricKey::Fp5
            | MetricKey::Fp6 => MetricFamily::FuturePower,
        }
    }

    /// Looks a key up by its code (`"FT"`, `"BP2"`, ...).
    #[must_use]
    pub fn from_code(code: &str) -> Option<MetricKey> {
        MetricKey::all().find(|key| key.code() == code)
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct FunnelMetrics {
    pub ft: f64,
    pub fw: f64,
    pub fz: f64,
    pub gc: f64,
    pub gj: f64,
    pub gl: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TimelineMetrics {
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
    pub t4: f64,
    pub t5: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BrandPowerMetrics {
    pub bp1: f64,
    pub bp2: f64,
    pub bp3: f64,
    pub bp4: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct FuturePowerMetrics {
    pub fp1: f64,
    pub fp2: f64,
    pub fp3: f64,
    pub fp4: f64,
    pub fp5: f64,
    pub fp6: f64,
}

/// All four closed families for one (segment, brand) pair.
///
/// Keys that had no matching header column stay at `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricBag {
    pub funnel: FunnelMetrics,
    pub timeline: TimelineMetrics,
    pub brand_power: BrandPowerMetrics,
    pub future_power: FuturePowerMetrics,
}

impl MetricBag {
    #[must_use]
    pub fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Ft => self.funnel.ft,
            MetricKey::Fw => self.funnel.fw,
            MetricKey::Fz => self.funnel.fz,
            MetricKey::Gc => self.funnel.gc,
            MetricKey::Gj => self.funnel.gj,
            MetricKey::Gl => self.funnel.gl,
            MetricKey::T1 => self.timeline.t1,
            MetricKey::T2 => self.timeline.t2,
            MetricKey::T3 => self.timeline.t3,
            MetricKey::T4 => self.timeline.t4,
            MetricKey::T5 => self.timeline.t5,
            MetricKey::Bp1 => self.brand_power.bp1,
            MetricKey::Bp2 => self.brand_power.bp2,
            MetricKey::Bp3 => self.brand_power.bp3,
            MetricKey::Bp4 => self.brand_power.bp4,
            MetricKey::Fp1 => self.future_power.fp1,
            MetricKey::Fp2 => self.future_power.fp2,
            MetricKey::Fp3 => self.future_power.fp3,
            MetricKey::Fp4 => self.future_power.fp4,
            MetricKey::Fp5 => self.future_power.fp5,
            MetricKey::Fp6 => self.future_power.fp6,
        }
    }

    pub fn set(&mut self, key: MetricKey, value: f64) {
        let slot = match key {
            MetricKey::Ft => &mut self.funnel.ft,
            MetricKey::Fw => &mut self.funnel.fw,
            MetricKey::Fz => &mut self.funnel.fz,
            MetricKey::Gc => &mut self.funnel.gc,
            MetricKey::Gj => &mut self.funnel.gj,
            MetricKey::Gl => &mut self.funnel.gl,
            MetricKey::T1 => &mut self.timeline.t1,
            MetricKey::T2 => &mut self.timeline.t2,
            MetricKey::T3 => &mut self.timeline.t3,
            MetricKey::T4 => &mut self.timeline.t4,
            MetricKey::T5 => &mut self.timeline.t5,
            MetricKey::Bp1 => &mut self.brand_power.bp1,
            MetricKey::Bp2 => &mut self.brand_power.bp2,
            MetricKey::Bp3 => &mut self.brand_power.bp3,
            MetricKey::Bp4 => &mut self.brand_power.bp4,
            MetricKey::Fp1 => &mut self.future_power.fp1,
            MetricKey::Fp2 => &mut self.future_power.fp2,
            MetricKey::Fp3 => &mut self.future_power.fp3,
            MetricKey::Fp4 => &mut self.future_power.fp4,
            MetricKey::Fp5 => &mut self.future_power.fp5,
            MetricKey::Fp6 => &mut self.future_power.fp6,
        };
        *slot = value;
    }
}
