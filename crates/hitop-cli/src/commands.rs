use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use hitop_core::{compute_scores, load_and_process, load_spectrum_dictionary};
use hitop_ingest::{DataPaths, DataType};
use hitop_model::{MappingColumns, MetadataColumns, ScoringOptions, SpectrumDictionary};

use hitop_cli::report::{
    Phase, QuestionnaireSummary, ScoresResult, questionnaire_summaries, write_csv,
};

use crate::cli::{QuestionnairesArgs, ScoresArgs, SpectraArgs};

pub fn run_questionnaires(args: &QuestionnairesArgs) -> Result<Vec<QuestionnaireSummary>> {
    let span = info_span!("questionnaires", data_type = %args.data_type);
    let _guard = span.enter();
    let paths = DataPaths::new(&args.data.data_dir);
    let processed = load_and_process(&paths, args.data_type, &MetadataColumns::default())
        .with_context(|| format!("process {} data in {}", args.data_type, paths.base_dir.display()))?;
    if processed.metadata.is_none() {
        bail!(
            "variable metadata not found at {}",
            paths.test_variables().display()
        );
    }

    let mut summaries = Vec::new();
    for (phase, partitions) in [(Phase::Pre, processed.pre), (Phase::Post, processed.post)] {
        match partitions {
            Some(partitions) => summaries.extend(questionnaire_summaries(phase, &partitions)),
            None => warn!(phase = phase.as_str(), "no dataset for phase"),
        }
    }
    info!(questionnaires = summaries.len(), "listed questionnaires");
    Ok(summaries)
}

pub fn run_spectra(args: &SpectraArgs) -> Result<SpectrumDictionary> {
    let paths = DataPaths::new(&args.data.data_dir).with_mapping_file(args.mapping.clone());
    load_spectrum_dictionary(&paths, &MappingColumns::default())
        .with_context(|| format!("resolve mapping {}", paths.hitop_mapping().display()))
}

pub fn run_scores(args: &ScoresArgs) -> Result<ScoresResult> {
    let span = info_span!("scores");
    let _guard = span.enter();
    let paths = DataPaths::new(&args.data.data_dir).with_mapping_file(args.mapping.clone());
    let options = ScoringOptions::default().with_z_prefix(args.z_prefix.clone());

    let Some(scores) = compute_scores(&paths, &MappingColumns::default(), &options)
        .context("compute spectrum scores")?
    else {
        bail!(
            "standardized dataset not found at {}",
            paths.pre_dataset(DataType::Standardized).display()
        );
    };

    let output = match &args.output {
        Some(path) => {
            let mut frame = match &args.id_column {
                Some(id_column) => scores
                    .select_scores(id_column)
                    .with_context(|| format!("select scores by {id_column}"))?,
                None => scores.data.clone(),
            };
            write_csv(&mut frame, path)?;
            info!(path = %path.display(), rows = frame.height(), "wrote score table");
            Some(path.clone())
        }
        None => None,
    };

    Ok(ScoresResult {
        patients: scores.data.height(),
        summaries: scores.summaries().context("summarize scores")?,
        skipped: scores.skipped.clone(),
        output,
    })
}
