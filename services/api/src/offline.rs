use crate::infra::{load_model, read_json_input};
use clap::Args;
use risk_scoring::config::AppConfig;
use risk_scoring::error::AppError;
use risk_scoring::{ClinicalPredictor, LifestyleAssessment, LifestyleAssessor};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Lifestyle questionnaire as JSON (`-` reads stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the response body as JSON instead of the breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Clinical measurements as JSON (`-` reads stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override the model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { input, json } = args;

    let body = read_json_input(&input)?;
    let assessment = LifestyleAssessor::new().assess_value(body)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment.response())?);
    } else {
        render_assessment(&assessment);
    }
    Ok(())
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs { input, model } = args;

    let config = AppConfig::load()?;
    let model = load_model(&config, model)?;
    let predictor = ClinicalPredictor::new(Arc::new(model));

    let body = read_json_input(&input)?;
    let prediction = predictor.predict(&body)?;
    let response = prediction.response();

    println!("Clinical prediction");
    println!(
        "- probability {:.4} -> risk score {:.2}",
        prediction.probability, response.risk_score
    );
    println!("- label: {}", response.label);
    Ok(())
}

fn render_assessment(assessment: &LifestyleAssessment) {
    println!("Lifestyle risk assessment");
    println!("Rules applied");
    for component in &assessment.components {
        println!(
            "- {:?}: +{:.2} ({})",
            component.factor, component.weight, component.notes
        );
    }

    let response = assessment.response();
    println!(
        "\nRisk score: {:.2} ({})",
        response.risk_score, response.label
    );
}
