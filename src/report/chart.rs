//! Ranking chart generation (plotters)
//!
//! Renders the ranking as a PNG bar chart, one bar per province.

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::models::IndexRecord;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_MANAGEABLE: (u8, u8, u8) = (251, 146, 60); // Orange
const COLOR_TIGHT: (u8, u8, u8) = (248, 113, 113); // Light red
const COLOR_DIFFICULT: (u8, u8, u8) = (239, 68, 68); // Red
const COLOR_CRUSHING: (u8, u8, u8) = (153, 27, 27); // Dark red
const COLOR_OFFICIAL: (u8, u8, u8) = (70, 130, 180); // Steel blue

/// Bar color by real index band; official indices share one color
fn bar_color(value: f64, real: bool) -> (u8, u8, u8) {
    if !real {
        return COLOR_OFFICIAL;
    }
    if value >= 0.65 {
        COLOR_MANAGEABLE
    } else if value >= 0.55 {
        COLOR_TIGHT
    } else if value >= 0.50 {
        COLOR_DIFFICULT
    } else {
        COLOR_CRUSHING
    }
}

/// Largest accepted chart side in pixels
const MAX_CHART_SIDE: u32 = 16_384;

/// RGB buffer size for a chart, None when a side is zero or too large
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 || width > MAX_CHART_SIDE || height > MAX_CHART_SIDE {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
}

/// Generate the ranking bar chart as PNG bytes
pub fn render_ranking_chart(
    records: &[IndexRecord],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    if records.is_empty() {
        return Err("No data to chart".to_string());
    }
    let len = buffer_len(width, height)
        .ok_or_else(|| format!("Invalid chart size {}x{}", width, height))?;

    let real = records.iter().any(|r| r.real_index.is_some());
    let mut buffer = vec![0u8; len];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let y_max = records
            .iter()
            .map(IndexRecord::ranking_index)
            .fold(0.0_f64, f64::max);
        let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

        let caption = if real {
            "Real purchasing power index"
        } else {
            "Purchasing power index"
        };

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..records.len() as i32).into_segmented(), 0.0..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(records.len())
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) if *i >= 0 => records
                    .get(*i as usize)
                    .map(|r| r.name.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc("wage / basket")
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(records.iter().enumerate().map(|(i, record)| {
                let value = record.ranking_index();
                let (r, g, b) = bar_color(value, real);
                let i = i as i32;
                Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), value)],
                    RGBColor(r, g, b).filled(),
                )
            }))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_records_rejected() {
        assert!(render_ranking_chart(&[], 800, 600).is_err());
    }

    #[test]
    fn test_zero_size_rejected() {
        let records = vec![IndexRecord::new("辽宁", 19.0, 13.0)];
        assert!(render_ranking_chart(&records, 0, 600).is_err());
    }

    #[test]
    fn test_oversized_chart_rejected() {
        let records = vec![IndexRecord::new("辽宁", 19.0, 13.0)];
        assert!(render_ranking_chart(&records, 40_000, 40_000).is_err());
        assert!(render_ranking_chart(&records, u32::MAX, u32::MAX).is_err());
        assert!(render_ranking_chart(&records, 800, MAX_CHART_SIDE + 1).is_err());
    }

    #[test]
    fn test_buffer_len() {
        assert_eq!(buffer_len(800, 600), Some(1_440_000));
        assert_eq!(buffer_len(40_000, 600), None);
        assert_eq!(buffer_len(0, 600), None);
    }

    #[test]
    fn test_bar_color_bands() {
        assert_eq!(bar_color(0.7, true), COLOR_MANAGEABLE);
        assert_eq!(bar_color(0.6, true), COLOR_TIGHT);
        assert_eq!(bar_color(0.5, true), COLOR_DIFFICULT);
        assert_eq!(bar_color(0.3, true), COLOR_CRUSHING);
        assert_eq!(bar_color(0.3, false), COLOR_OFFICIAL);
    }
}
