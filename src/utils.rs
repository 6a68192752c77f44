pub fn difficulty_label(difficulty: u8) -> String {
    match difficulty {
        0 => "10 об".to_string(),
        1 => "25 об".to_string(),
        2 => "10 гер".to_string(),
        3 => "25 гер".to_string(),
        other => other.to_string(),
    }
}

pub fn absolute_image_url(origin: &str, path: &str) -> String {
    if path.starts_with("http") {
        return path.to_string();
    }

    format!("{origin}{path}")
}
