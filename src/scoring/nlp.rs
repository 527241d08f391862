use anyhow::{anyhow, Result};
use rust_bert::pipelines::ner::NERModel;
use rust_bert::pipelines::pos_tagging::POSModel;
use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
};
use simsimd::SpatialSimilarity;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

use super::language::{
    lemma_similarity, AnalyzedText, LanguageAnalysis, ModelTier, PartOfSpeech, Token,
};

enum AnalysisRequest {
    Analyze {
        text: String,
        response_tx: mpsc::Sender<Result<AnalyzedText>>,
    },
}

/// Handle to rust-bert pipelines running on a dedicated worker thread.
#[derive(Clone)]
pub struct BertAnalyzer {
    tier: ModelTier,
    request_tx: mpsc::Sender<AnalysisRequest>,
}

impl BertAnalyzer {
    /// Blocks until the worker has loaded every model of the tier, or failed to.
    pub fn spawn(tier: ModelTier) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<AnalysisRequest>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

        thread::Builder::new()
            .name(format!("nlp-{tier}"))
            .spawn(move || run_worker(tier, request_rx, ready_tx))?;

        ready_rx
            .recv()
            .map_err(|_| anyhow!("{tier} worker exited before loading"))??;

        Ok(Self { tier, request_tx })
    }
}

impl LanguageAnalysis for BertAnalyzer {
    fn name(&self) -> String {
        format!("model:{}", self.tier)
    }

    fn analyze(&self, text: &str) -> Result<AnalyzedText> {
        let (response_tx, response_rx) = mpsc::channel();
        self.request_tx
            .send(AnalysisRequest::Analyze {
                text: text.to_string(),
                response_tx,
            })
            .map_err(|_| anyhow!("analysis worker channel closed"))?;

        response_rx
            .recv()
            .map_err(|_| anyhow!("analysis worker dropped the request"))?
    }

    fn similarity(&self, a: &AnalyzedText, b: &AnalyzedText) -> f32 {
        match (&a.embedding, &b.embedding) {
            (Some(x), Some(y)) => cosine_similarity(x, y).clamp(0.0, 1.0),
            _ => lemma_similarity(a, b),
        }
    }
}

struct Pipelines {
    pos: POSModel,
    ner: NERModel,
    embeddings: Option<SentenceEmbeddingsModel>,
}

impl Pipelines {
    fn load(tier: ModelTier) -> Result<Self> {
        let start = Instant::now();
        let pos = POSModel::new(Default::default())?;
        let ner = NERModel::new(Default::default())?;
        info!(elapsed = start.elapsed().as_secs_f32(), "tagging models loaded");

        let embeddings = match tier {
            ModelTier::Full => Some(SentenceEmbeddingsModelType::AllMiniLmL12V2),
            ModelTier::Compact => Some(SentenceEmbeddingsModelType::AllMiniLmL6V2),
            ModelTier::Tagger => None,
        }
        .map(|model_type| SentenceEmbeddingsBuilder::remote(model_type).create_model())
        .transpose()?;
        info!(elapsed = start.elapsed().as_secs_f32(), %tier, "language pipelines ready");

        Ok(Self {
            pos,
            ner,
            embeddings,
        })
    }

    fn analyze(&self, text: &str) -> Result<AnalyzedText> {
        let tokens: Vec<Token> = self
            .pos
            .predict(&[text])
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|tag| Token::new(&tag.word, PartOfSpeech::from_penn(&tag.label, &tag.word)))
            .collect();

        let entities: Vec<String> = self
            .ner
            .predict_full_entities(&[text])
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|entity| entity.word)
            .collect();

        let mut analyzed = AnalyzedText::from_tokens(tokens).with_entities(entities);
        if let Some(model) = &self.embeddings {
            if let Some(embedding) = model.encode(&[text])?.into_iter().next() {
                analyzed = analyzed.with_embedding(embedding);
            }
        }

        debug!(
            tokens = analyzed.tokens.len(),
            sentences = analyzed.sentences.len(),
            entities = analyzed.entities.len(),
            "analyzed text"
        );
        Ok(analyzed)
    }
}

fn run_worker(
    tier: ModelTier,
    request_rx: mpsc::Receiver<AnalysisRequest>,
    ready_tx: mpsc::Sender<Result<()>>,
) {
    let pipelines = match Pipelines::load(tier) {
        Ok(pipelines) => {
            let _ = ready_tx.send(Ok(()));
            pipelines
        }
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    for request in request_rx {
        let AnalysisRequest::Analyze { text, response_tx } = request;
        let _ = response_tx.send(pipelines.analyze(&text));
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    f32::cosine(a, b)
        .map(|distance| (1.0 - distance) as f32)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = [1.0_f32, 0.0, 1.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-3);
        assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 1e-3);
    }
}
