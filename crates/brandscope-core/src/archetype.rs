//! Twelve-archetype brand personality profile derived from brand-image items.

use serde::{Deserialize, Serialize};

use crate::dataset::BrandImageMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Creator,
    Ruler,
    Sage,
    Explorer,
    Innocent,
    Outlaw,
    Magician,
    Hero,
    Lover,
    Jester,
    Regular,
    Caregiver,
}

impl Archetype {
    /// Display order used for the archetype item axis.
    pub const ALL: [Archetype; 12] = [
        Archetype::Creator,
        Archetype::Ruler,
        Archetype::Sage,
        Archetype::Explorer,
        Archetype::Innocent,
        Archetype::Outlaw,
        Archetype::Magician,
        Archetype::Hero,
        Archetype::Lover,
        Archetype::Jester,
        Archetype::Regular,
        Archetype::Caregiver,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Archetype::Creator => "creator",
            Archetype::Ruler => "ruler",
            Archetype::Sage => "sage",
            Archetype::Explorer => "explorer",
            Archetype::Innocent => "innocent",
            Archetype::Outlaw => "outlaw",
            Archetype::Magician => "magician",
            Archetype::Hero => "hero",
            Archetype::Lover => "lover",
            Archetype::Jester => "jester",
            Archetype::Regular => "regular",
            Archetype::Caregiver => "caregiver",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Archetype::Creator => "創造者",
            Archetype::Ruler => "統治者",
            Archetype::Sage => "賢者",
            Archetype::Explorer => "探検家",
            Archetype::Innocent => "幼子",
            Archetype::Outlaw => "無法者",
            Archetype::Magician => "魔術師",
            Archetype::Hero => "英雄",
            Archetype::Lover => "恋人",
            Archetype::Jester => "道化師",
            Archetype::Regular => "仲間",
            Archetype::Caregiver => "援助者",
        }
    }

    /// Brand-image item names averaged into this archetype.
    #[must_use]
    pub fn items(self) -> &'static [&'static str] {
        match self {
            Archetype::Creator => &[
                "新しい価値を提案する",
                "先見性のある",
                "独創性がある",
                "知的な",
                "信念・ポリシーのある",
            ],
            Archetype::Ruler => &[
                "その分野をけん引している",
                "社会的責任感のある",
                "伝統的な",
                "一流である",
            ],
            Archetype::Sage => &[
                "進歩的な",
                "先見性のある",
                "商品、サービスの質がよい",
                "知的な",
                "専門性がある",
            ],
            Archetype::Explorer => &[
                "個性的な",
                "人々をワクワクさせる",
                "チャレンジ精神のある",
                "信念・ポリシーのある",
                "大胆な",
            ],
            Archetype::Innocent => &["誠実な", "親切な", "わかりやすい", "シンプルな", "ピュアな"],
            Archetype::Outlaw => &[
                "革新的な",
                "たくましい・力強い",
                "チャレンジ精神のある",
                "大胆な",
            ],
            Archetype::Magician => &[
                "現代的な",
                "革新的な",
                "人々をワクワクさせる",
                "夢のある",
                "知的な",
            ],
            Archetype::Hero => &[
                "期待されている",
                "革新的な",
                "人々をワクワクさせる",
                "力をもらえる",
                "高性能な",
            ],
            Archetype::Lover => &["感性に訴える", "華やかな", "魅力的な"],
            Archetype::Jester => &[
                "楽しい",
                "革新的な",
                "人々をワクワクさせる",
                "活気がある",
                "大胆な",
            ],
            Archetype::Regular => &[
                "気楽に接することができる",
                "社交的な",
                "親切な",
                "庶民的な",
            ],
            Archetype::Caregiver => &[
                "生活をよりよくしてくれる",
                "安心・信頼できる",
                "誠実な",
                "親切な",
                "消費者のことを考えている",
            ],
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Archetype> {
        Archetype::ALL.into_iter().find(|a| a.key() == key)
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Derived archetype scores for one (segment, brand) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    pub creator: f64,
    pub ruler: f64,
    pub sage: f64,
    pub explorer: f64,
    pub innocent: f64,
    pub outlaw: f64,
    pub magician: f64,
    pub hero: f64,
    pub lover: f64,
    pub jester: f64,
    pub regular: f64,
    pub caregiver: f64,
}

impl ArchetypeProfile {
    #[must_use]
    pub fn get(&self, archetype: Archetype) -> f64 {
        match archetype {
            Archetype::Creator => self.creator,
            Archetype::Ruler => self.ruler,
            Archetype::Sage => self.sage,
            Archetype::Explorer => self.explorer,
            Archetype::Innocent => self.innocent,
            Archetype::Outlaw => self.outlaw,
            Archetype::Magician => self.magician,
            Archetype::Hero => self.hero,
            Archetype::Lover => self.lover,
            Archetype::Jester => self.jester,
            Archetype::Regular => self.regular,
            Archetype::Caregiver => self.caregiver,
        }
    }

    fn slot(&mut self, archetype: Archetype) -> &mut f64 {
        match archetype {
            Archetype::Creator => &mut self.creator,
            Archetype::Ruler => &mut self.ruler,
            Archetype::Sage => &mut self.sage,
            Archetype::Explorer => &mut self.explorer,
            Archetype::Innocent => &mut self.innocent,
            Archetype::Outlaw => &mut self.outlaw,
            Archetype::Magician => &mut self.magician,
            Archetype::Hero => &mut self.hero,
            Archetype::Lover => &mut self.lover,
            Archetype::Jester => &mut self.jester,
            Archetype::Regular => &mut self.regular,
            Archetype::Caregiver => &mut self.caregiver,
        }
    }
}

/// Derive the archetype profile from one brand's image scores.
///
/// Each archetype is the mean of its configured items that are actually
/// present in `images`. Absent items are left out of both the sum and the
/// count; an archetype with no present items scores `0.0`.
#[must_use]
pub fn derive_profile(images: &BrandImageMap) -> ArchetypeProfile {
    let mut profile = ArchetypeProfile::default();

    for archetype in Archetype::ALL {
        let (sum, count) = archetype
            .items()
            .iter()
            .filter_map(|item| images.get(item))
            .filter(|value| value.is_finite())
            .fold((0.0_f64, 0_u32), |(sum, count), value| (sum + value, count + 1));

        if count > 0 {
            *profile.slot(archetype) = sum / f64::from(count);
        }
    }

    profile
}
