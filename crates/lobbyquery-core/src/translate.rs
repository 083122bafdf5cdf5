//! Bilingual vocabulary for game terms.
//!
//! The directory API speaks English identifiers (game modes, seasons,
//! character prefabs) while chat users mostly type Chinese. Rendering
//! translates to Chinese; the season filter translates user input back
//! to English before it is sent. Unknown tokens pass through unchanged.

/// Translate a game term to its Chinese display form.
#[must_use]
pub fn to_chinese(text: &str) -> &str {
    match text {
        "survival" => "生存",
        "relaxed" => "轻松",
        "endless" => "无尽",
        "wilderness" => "荒野",
        "lightsout" => "暗无天日",
        "cooperative" => "合作",
        "lavaarena" => "熔炉",
        "social" => "社交",
        "oceanfishing" | "OceanFishing" => "海钓",

        "spring" => "春",
        "summer" => "夏",
        "autumn" => "秋",
        "winter" => "冬",

        "wendy" => "温蒂",
        "wilson" => "威尔逊",
        "wathgrithr" => "薇格弗德",
        "wolfgang" => "沃尔夫冈",
        "woodie" => "伍迪",
        "wickerbottom" => "薇克巴顿",
        "waxwell" => "麦斯威尔",
        "wormwood" => "沃姆伍德",
        "wx78" => "WX78",
        "wanda" => "旺达",
        "webber" => "韦伯",
        "wortox" => "沃拓克斯",
        "willow" => "薇洛",
        "warly" => "沃利",
        "wurt" => "沃特",
        "winona" => "薇诺娜",
        "walter" => "沃尔特",
        "wes" => "韦斯",

        _ => text,
    }
}

/// Translate a Chinese game term back to the English API identifier.
#[must_use]
pub fn to_english(text: &str) -> &str {
    match text {
        "生存" => "survival",
        "轻松" => "relaxed",
        "无尽" => "endless",
        "荒野" => "wilderness",
        "暗无天日" => "lightsout",
        "合作" => "cooperative",
        "熔炉" => "lavaarena",
        "社交" => "social",
        "海钓" => "oceanfishing",

        "春" | "春天" | "春季" => "spring",
        "夏" | "夏天" | "夏季" => "summer",
        "秋" | "秋天" | "秋季" => "autumn",
        "冬" | "冬天" | "冬季" => "winter",

        _ => text,
    }
}
