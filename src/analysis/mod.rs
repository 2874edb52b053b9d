//! Pure text analysis: tokenization, sentiment classification, category inference.
//!
//! Nothing here touches shared state, so analysis can run on any thread
//! ahead of the commit step.

mod categorizer;
mod classifier;
mod lexicon;
mod tokenizer;

use std::collections::BTreeSet;

use crate::models::{Category, Sentiment};
use categorizer::detect_category;
use classifier::{Classification, SentimentClassifier};
use lexicon::SentimentLexicon;
use tokenizer::Tokenizer;

/// A feedback text that has been classified and tokenized but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedFeedback {
    pub text: String,
    pub category: Category,
    pub classification: Classification,
    pub keywords: BTreeSet<String>,
}

/// Combines the tokenizer, classifier and category detector.
#[derive(Debug, Clone)]
pub struct FeedbackAnalyzer {
    tokenizer: Tokenizer,
    classifier: SentimentClassifier,
    auto_categorize: bool,
}

impl FeedbackAnalyzer {
    pub fn new(auto_categorize: bool) -> Self {
        let tokenizer = Tokenizer::new();
        Self {
            classifier: SentimentClassifier::new(tokenizer.clone(), SentimentLexicon::new()),
            tokenizer,
            auto_categorize,
        }
    }

    /// Distinct keywords of a text, as counted by the theme extractor.
    pub fn keywords(&self, text: &str) -> BTreeSet<String> {
        self.tokenizer.keywords(text)
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        self.classifier.classify(text)
    }

    /// Analyze one text. The caller is responsible for rejecting empty text.
    pub fn analyze(&self, text: &str, category: Category) -> AnalyzedFeedback {
        let category = if self.auto_categorize && category == Category::General {
            detect_category(text)
        } else {
            category
        };

        AnalyzedFeedback {
            text: text.to_string(),
            category,
            classification: self.classifier.analyze(text),
            keywords: self.keywords(text),
        }
    }
}
