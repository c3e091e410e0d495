//! Classifies a sample request with the bundled rule-based extractor and
//! prints the decision and any missing fields.

use sarabun::providers::extractor::{FieldExtractor, RegexFieldExtractor};
use sarabun::{classify, completeness_check, ClassifierConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let request = std::env::args().nth(1).unwrap_or_else(|| {
        "ขอให้จัดทำหนังสือส่งถึงกระทรวงอุตสาหกรรม เรื่อง ขอเชิญตรวจสอบร่วม เรียน อธิบดีกรมโรงงานอุตสาหกรรม เพื่อประสานการตรวจสอบคลื่นความถี่".to_string()
    });

    let fields = RegexFieldExtractor::new().extract(&request).await?;
    let missing = completeness_check(&fields);
    if !missing.is_empty() {
        println!("missing fields: {missing:?}");
    }

    let config = ClassifierConfig::default();
    let result = classify(&request, &fields, &config);
    println!(
        "kind: {} ({}), confidence: {:.2}",
        result.kind,
        result.kind.name_th(),
        result.confidence
    );
    for (kind, score) in &result.scores {
        println!("  {kind:<14} {score:.1}");
    }
    Ok(())
}
