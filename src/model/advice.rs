use serde::Serialize;

use crate::model::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    BalanceCorrection,
    LimbSync,
    HipRotation,
    GoodRhythm,
}

pub fn advice_order() -> &'static [Advice] {
    &[
        Advice::BalanceCorrection,
        Advice::LimbSync,
        Advice::HipRotation,
        Advice::GoodRhythm,
    ]
}

impl Advice {
    pub fn code(self) -> &'static str {
        match self {
            Advice::BalanceCorrection => "BALANCE_CORRECTION",
            Advice::LimbSync => "LIMB_SYNC",
            Advice::HipRotation => "HIP_ROTATION",
            Advice::GoodRhythm => "GOOD_RHYTHM",
        }
    }

    pub fn text(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::ZhTw, Advice::BalanceCorrection) => {
                "重心偏移較明顯，嘗試將髖部保持在雙腳支撐區域中央。"
            }
            (Locale::ZhTw, Advice::LimbSync) => {
                "手腳切換不同步，建議先做『腳先到位、手再發力』的節奏練習。"
            }
            (Locale::ZhTw, Advice::HipRotation) => {
                "髖部延展不足，嘗試在踩高點時先轉髖再伸手，減少手臂硬拉。"
            }
            (Locale::ZhTw, Advice::GoodRhythm) => {
                "節奏與重心表現良好，可嘗試更小支點路線提升精準度。"
            }
            (Locale::En, Advice::BalanceCorrection) => {
                "Center of mass is drifting; keep your hips centered over the base of your feet."
            }
            (Locale::En, Advice::LimbSync) => {
                "Hands and feet are out of sync; drill a 'feet first, then pull' rhythm."
            }
            (Locale::En, Advice::HipRotation) => {
                "Hips are not extended; on high steps turn the hip in before reaching, and pull less with the arms."
            }
            (Locale::En, Advice::GoodRhythm) => {
                "Rhythm and balance look good; try routes with smaller holds to sharpen precision."
            }
        }
    }
}
