use crate::error::{quote_error, DashResult};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::path::PathBuf;
use tokio::fs;

/// Quotes file with one quote per line
#[derive(Debug, Clone)]
pub struct QuoteSource {
    path: PathBuf,
}

/// Pick one non-blank line of `content`
pub fn pick_line<R: Rng + ?Sized>(content: &str, rng: &mut R) -> Option<String> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();

    lines.choose(rng).map(|line| line.to_string())
}

impl QuoteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the file and return a random quote
    pub async fn random_quote(&self) -> DashResult<String> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            quote_error(&format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        pick_line(&content, &mut rand::rng())
            .ok_or_else(|| quote_error(&format!("{} has no quotes", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_line() {
        let content = "First quote\n\n   \nSecond quote\r\n";
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let quote = pick_line(content, &mut rng).unwrap();
            assert!(quote == "First quote" || quote == "Second quote", "got {:?}", quote);
        }

        assert_eq!(pick_line("", &mut rng), None);
        assert_eq!(pick_line("\n  \n", &mut rng), None);
    }

    #[tokio::test]
    async fn test_random_quote_from_file() {
        let path = std::env::temp_dir().join(format!("dashboard-quotes-{}", std::process::id()));
        std::fs::write(&path, "Only one\n").unwrap();

        let source = QuoteSource::new(path.clone());
        assert_eq!(source.random_quote().await.unwrap(), "Only one");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = QuoteSource::new("/nonexistent/dashboard/quotes");
        let err = source.random_quote().await.unwrap_err();
        assert!(matches!(err, crate::error::Error::Quote(_)));
    }
}
