use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum Locale {
    #[default]
    #[value(name = "zh-tw")]
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[value(name = "en")]
    #[serde(rename = "en")]
    En,
}

impl Locale {
    pub fn loading_model(self) -> &'static str {
        match self {
            Locale::ZhTw => "模型載入中...",
            Locale::En => "Loading model...",
        }
    }

    pub fn analyzing(self) -> &'static str {
        match self {
            Locale::ZhTw => "分析中：請面向鏡頭模擬攀爬動作。",
            Locale::En => "Analyzing: face the camera and simulate climbing moves.",
        }
    }

    pub fn start_failed(self) -> &'static str {
        match self {
            Locale::ZhTw => "無法啟動攝影機或模型，請確認瀏覽器權限與網路。",
            Locale::En => {
                "Unable to start the camera or model; check camera permissions and network access."
            }
        }
    }

    pub fn analysis_failed(self) -> &'static str {
        match self {
            Locale::ZhTw => "姿勢偵測中斷，請重新啟動分析。",
            Locale::En => "Pose detection stopped unexpectedly; start the analysis again.",
        }
    }

    pub fn stopped(self) -> &'static str {
        match self {
            Locale::ZhTw => "分析已停止。",
            Locale::En => "Analysis stopped.",
        }
    }

    pub fn idle(self) -> &'static str {
        match self {
            Locale::ZhTw => "尚未開始。",
            Locale::En => "Not started.",
        }
    }

    /// Label of the start control once a session is running.
    pub fn control_busy(self) -> &'static str {
        match self {
            Locale::ZhTw => "分析進行中",
            Locale::En => "Analysis running",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::ZhTw => "zh-TW",
            Locale::En => "en",
        }
    }
}
