/// Kiosk languages and their static label sets

use serde::{Deserialize, Serialize};

/// Languages offered on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "EN")]
    English,
    #[serde(rename = "TC")]
    TraditionalChinese,
    #[serde(rename = "SC")]
    SimplifiedChinese,
}

impl Language {
    pub const ALL: [Language; 3] = [
        Language::English,
        Language::TraditionalChinese,
        Language::SimplifiedChinese,
    ];

    /// Short code used in config files and logs
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::TraditionalChinese => "TC",
            Language::SimplifiedChinese => "SC",
        }
    }

    /// Button caption on the home page, written in the language itself
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "Eng",
            Language::TraditionalChinese => "繁體",
            Language::SimplifiedChinese => "简体",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Language::English => &ENGLISH,
            Language::TraditionalChinese => &TRADITIONAL_CHINESE,
            Language::SimplifiedChinese => &SIMPLIFIED_CHINESE,
        }
    }
}

/// Every caption the booth renders
#[derive(Debug)]
pub struct Labels {
    pub select_language: &'static str,
    pub choose_style: &'static str,
    pub start_capture: &'static str,
    pub get_ready: &'static str,
    pub retake: &'static str,
    pub done: &'static str,
    pub generating: &'static str,
    pub almost_there: &'static str,
    pub decorate: &'static str,
    pub clear_stickers: &'static str,
    pub drag_hint: &'static str,
    pub tab_faces: &'static str,
    pub tab_animals: &'static str,
    pub tab_party: &'static str,
}

static ENGLISH: Labels = Labels {
    select_language: "SELECT LANGUAGE",
    choose_style: "CHOOSE YOUR STYLE",
    start_capture: "START",
    get_ready: "Get ready!",
    retake: "RETAKE",
    done: "DONE",
    generating: "Generating your photo...",
    almost_there: "Almost there!",
    decorate: "DECORATE YOUR PHOTO",
    clear_stickers: "CLEAR",
    drag_hint: "Tap or drag a sticker onto your photo",
    tab_faces: "Faces",
    tab_animals: "Animals",
    tab_party: "Party",
};

static TRADITIONAL_CHINESE: Labels = Labels {
    select_language: "選擇語言",
    choose_style: "選擇風格",
    start_capture: "開始",
    get_ready: "準備好!",
    retake: "重拍",
    done: "完成",
    generating: "正在生成你的相片...",
    almost_there: "快完成了!",
    decorate: "裝飾你的相片",
    clear_stickers: "清除",
    drag_hint: "點擊或拖曳貼紙到相片上",
    tab_faces: "表情",
    tab_animals: "動物",
    tab_party: "派對",
};

static SIMPLIFIED_CHINESE: Labels = Labels {
    select_language: "选择语言",
    choose_style: "选择风格",
    start_capture: "开始",
    get_ready: "准备好!",
    retake: "重拍",
    done: "完成",
    generating: "正在生成你的照片...",
    almost_there: "快完成了!",
    decorate: "装饰你的照片",
    clear_stickers: "清除",
    drag_hint: "点击或拖动贴纸到照片上",
    tab_faces: "表情",
    tab_animals: "动物",
    tab_party: "派对",
};
