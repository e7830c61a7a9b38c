use weather_core::WeatherSummary;

/// Multi-line text view; fields the provider left out are skipped.
pub fn summary(summary: &WeatherSummary) -> String {
    let mut lines = vec![summary.city.clone()];

    if let Some(url) = summary.icon_url() {
        lines.push(format!("Ikon: {url}"));
    }
    if let Some(temp) = summary.temp {
        lines.push(format!("{temp}°C"));
    }
    if !summary.description.is_empty() {
        lines.push(summary.description.clone());
    }

    let meta: Vec<String> = [
        summary.wind.map(|w| format!("Vind: {w} m/s")),
        summary.humidity.map(|h| format!("Fugt: {h}%")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !meta.is_empty() {
        lines.push(meta.join("  "));
    }

    lines.join("\n")
}
