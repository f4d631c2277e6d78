use gloo_net::http::Request;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

const PAIRS_URL: &str = "assets/pairs.json";
const SCRAMBLE_ATTEMPTS: usize = 8;

/// One row of the board: the fixed left item and the right value it should
/// end up matched with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pair {
    pub left: String,
    pub right: String,
}

#[derive(Debug)]
pub enum DataError {
    Network(String),
    Parse(String),
}

impl DataError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Parse(message) => write!(f, "invalid pair list: {message}"),
        }
    }
}

pub async fn fetch_pairs() -> Result<Vec<Pair>, DataError> {
    let response = Request::get(PAIRS_URL)
        .send()
        .await
        .map_err(DataError::network)?;

    if !response.ok() {
        return Err(DataError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            PAIRS_URL
        )));
    }

    let text = response.text().await.map_err(DataError::network)?;
    parse_pairs(&text)
}

pub fn parse_pairs(text: &str) -> Result<Vec<Pair>, DataError> {
    let raw: Vec<Pair> =
        serde_json::from_str(text).map_err(|err| DataError::Parse(err.to_string()))?;

    if raw.is_empty() {
        return Err(DataError::Parse("the pair list is empty".to_string()));
    }

    let mut pairs = Vec::with_capacity(raw.len());
    for (index, pair) in raw.into_iter().enumerate() {
        let left = pair.left.trim().to_string();
        let right = pair.right.trim().to_string();
        if left.is_empty() || right.is_empty() {
            return Err(DataError::Parse(format!("pair {index} has an empty side")));
        }
        pairs.push(Pair { left, right });
    }

    Ok(pairs)
}

/// Right-column values in a scrambled order, so the board never starts
/// solved. Reshuffles a bounded number of times when the shuffle lands on
/// the identity arrangement; with one row there is nothing to scramble.
pub fn scrambled_rights<R: Rng>(pairs: &[Pair], rng: &mut R) -> Vec<String> {
    let mut values: Vec<String> = pairs.iter().map(|pair| pair.right.clone()).collect();
    if values.len() < 2 {
        return values;
    }

    for _ in 0..SCRAMBLE_ATTEMPTS {
        values.shuffle(rng);
        let moved = pairs
            .iter()
            .zip(&values)
            .any(|(pair, value)| pair.right != *value);
        if moved {
            break;
        }
    }

    values
}
