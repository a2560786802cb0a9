use crate::cli::PlanParams;
use crate::error::ImgPrepError;
use std::io::Write;

/// Writes one tab-separated line per item: position, query, URL, destination.
pub fn run_plan(params: PlanParams, out: &mut impl Write) -> Result<(), ImgPrepError> {
    for item in &params.items {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            item.position,
            item.query,
            item.url,
            item.output_path.display()
        )?;
    }
    out.flush()?;

    tracing::debug!("Planned {} downloads", params.items.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{FileNaming, plan_downloads};
    use crate::search::SearchTemplate;
    use std::path::Path;

    #[test]
    fn test_plan_lines() {
        let queries = vec!["Zen Garden".to_string(), "Sky View Lounge".to_string()];
        let items = plan_downloads(
            &queries,
            &SearchTemplate::default(),
            &FileNaming::default(),
            Path::new("images"),
        )
        .unwrap();

        let mut out = Vec::new();
        run_plan(PlanParams { items }, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1\tZen Garden\thttps://source.unsplash.com/featured/?restaurant,zen-garden,kenya\timages/restaurant1.jpg",
                "2\tSky View Lounge\thttps://source.unsplash.com/featured/?restaurant,sky-view-lounge,kenya\timages/restaurant2.jpg",
            ]
        );
    }
}
