//! Instruction template for the planning loop.
//!
//! The template fixes the step ordering the agent is asked to follow and
//! the Thought/Action/Action Input/Observation exchange format. The
//! missing-value instruction is switched on the session policy so the
//! model is steered toward the tool the replay executor will honor.

use crate::catalog::ToolSpec;
use crate::types::MissingValueStrategy;

/// The task given to the agent at the end of the prompt.
const QUESTION: &str = "Analyze this dataset and perform comprehensive cleaning to handle \
missing values, outliers, and duplicates automatically. Be thorough and explain what \
cleaning steps were taken.";

/// The policy-dependent missing-value instruction.
fn missing_value_instruction(strategy: MissingValueStrategy) -> &'static str {
    match strategy {
        MissingValueStrategy::FillMean => {
            "3. Handle missing values - use fill_missing_with_mean for numeric columns"
        }
        MissingValueStrategy::Drop => {
            "3. Handle missing values - use drop_missing_values to remove rows with missing values"
        }
    }
}

/// Render the tool catalog as `name: description` lines.
fn render_tool_list(specs: &[ToolSpec]) -> String {
    specs
        .iter()
        .map(|spec| format!("{}: {}", spec.name, spec.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full prompt for one planning step.
///
/// `transcript` holds the raw model output of each previous step followed
/// by its observation line; it grows by one entry per step and is what
/// gives the loop its memory.
pub fn build_prompt(
    specs: &[ToolSpec],
    strategy: MissingValueStrategy,
    transcript: &[String],
) -> String {
    let tool_names: Vec<&str> = specs.iter().map(|spec| spec.name).collect();

    let mut prompt = format!(
        "You are a data cleaning assistant. Follow these instructions to clean the dataset:\n\
        \n\
        1. Start by understanding the dataset structure using get_dataframe_info and get_dataframe_sample\n\
        2. Check for missing values with detect_missing_values\n\
        {missing_instruction}\n\
        4. Check for outliers with detect_outliers\n\
        5. Remove outliers with remove_outliers if necessary\n\
        6. Remove duplicates with remove_duplicates\n\
        7. Provide a detailed summary of all issues found and actions taken\n\
        \n\
        You have access to the following tools:\n\
        \n\
        {tools}\n\
        \n\
        Use the following format:\n\
        \n\
        Thought: you should always think about what to do\n\
        Action: the action to take, should be one of [{tool_names}]\n\
        Action Input: the input to the action\n\
        Observation: the result of the action\n\
        ... (this Thought/Action/Action Input/Observation can repeat N times)\n\
        Thought: I now know the final answer\n\
        Final Answer: Provide a summary of all the cleaning steps taken and the final state of the data\n\
        \n\
        Question: {question}\n",
        missing_instruction = missing_value_instruction(strategy),
        tools = render_tool_list(specs),
        tool_names = tool_names.join(", "),
        question = QUESTION,
    );

    if !transcript.is_empty() {
        prompt.push('\n');
        prompt.push_str(&transcript.join("\n"));
        prompt.push('\n');
    }

    prompt
}
