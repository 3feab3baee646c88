pub mod sentiment_analyzer;
