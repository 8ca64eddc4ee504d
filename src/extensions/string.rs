pub trait ToIsoSeparators {
    /// Trims the value, turns `/` date separators into `-` and a single space
    /// between date and time into `T`.
    fn to_iso_separators(&self) -> String;
}

impl ToIsoSeparators for str {
    fn to_iso_separators(&self) -> String {
        let dashed = self.trim().replace('/', "-");
        match dashed.split_once(' ') {
            Some((date, time)) if !time.trim().is_empty() => {
                format!("{}T{}", date, time.trim())
            }
            _ => dashed,
        }
    }
}

impl ToIsoSeparators for String {
    fn to_iso_separators(&self) -> String {
        self.as_str().to_iso_separators()
    }
}
