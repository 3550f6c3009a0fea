use anyhow::{Context, bail};
use msn_core::McqQuestion;
use msn_core::mcq::{has_mcq_tag, try_decode};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::McqArgs;
use crate::output::output;

/// Handle `msn mcq`.
pub fn handle(args: &McqArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let question = question_from(&text)
        .with_context(|| format!("{} is not a multiple-choice question", args.file.display()))?;
    output(&question, flags.format)
}

fn question_from(text: &str) -> anyhow::Result<McqQuestion> {
    if !has_mcq_tag(text) {
        bail!("description does not start with the MCQ tag");
    }
    match try_decode(text) {
        Some(question) => Ok(question),
        None => bail!("MCQ body is not valid question JSON"),
    }
}
