//! Interactive browsing of a schema.
//!
//! Each iteration walks: operation kind → action → selection (or mutation
//! arguments) → depth limit → variables → assembly → execution → display.
//! Nothing carries over between iterations except the schema and transport.
use indexmap::IndexMap;

use crate::document::{mutation_selection, OperationDocument};
use crate::error::{Error, PromptError};
use crate::prompt::{pick, Prompter, DEFAULT_DEPTH};
use crate::report;
use crate::schema::{Field, OperationKind, Schema};
use crate::selection::{depth, resolve, truncate, SelectionNode};
use crate::transport::{GraphQlResponse, Outcome, Transport};
use crate::variables::{coerce, prompt_label};

pub struct Browser<'s, P, T> {
    schema: &'s Schema,
    prompter: P,
    transport: T,
}

/// What one pass through the loop sent and got back.
#[derive(Debug)]
pub struct Iteration {
    pub document: OperationDocument,
    /// `None` when the request itself failed.
    pub outcome: Option<Outcome>,
}

impl<'s, P: Prompter, T: Transport> Browser<'s, P, T> {
    pub fn new(schema: &'s Schema, prompter: P, transport: T) -> Self {
        Self { schema, prompter, transport }
    }

    /// Browse until the operator interrupts a prompt, or there is nothing to browse.
    pub async fn run(&mut self) -> Result<(), Error> {
        for iteration in 1.. {
            tracing::debug!(iteration, "browse iteration");
            self.step().await?;
        }
        Ok(())
    }

    pub async fn step(&mut self) -> Result<Iteration, Error> {
        let schema = self.schema;
        let kind = self.select_kind()?;
        let root = schema.root(kind).ok_or(Error::NothingToBrowse)?;

        let mut actions = schema.actions(kind).into_iter().map(str::to_string).collect::<Vec<_>>();
        actions.sort();
        let action = pick(&mut self.prompter, actions, "Which action would you like to perform?")?
            .ok_or(Error::NothingToBrowse)?;
        let field = root.field(&action).ok_or(Error::NothingToBrowse)?;

        let selection = match kind {
            OperationKind::Query => self.query_selection(field)?,
            OperationKind::Mutation => mutation_selection(field),
        };
        let raw = self.collect_arguments(field)?;
        let variables = coerce(&field.args, &raw);
        let document = OperationDocument::assemble(kind, action, variables, selection);

        report::success_heading("Assembled query:");
        println!("{document}");
        report::blank();

        let outcome = match self.transport.post(&document.request_body()).await {
            Ok(response) => {
                let outcome = GraphQlResponse::from_value(response).outcome();
                display(&outcome);
                Some(outcome)
            }
            Err(err) => {
                tracing::warn!("query execution failed: {err}");
                report::failure(format!("Query execution failed: {err}"));
                report::blank();
                None
            }
        };
        Ok(Iteration { document, outcome })
    }

    fn select_kind(&mut self) -> Result<OperationKind, Error> {
        let kinds = self.schema.browsable_kinds();
        if kinds.is_empty() {
            return Err(Error::NothingToBrowse);
        }
        let options = kinds.iter().map(|kind| kind.keyword().to_string()).collect();
        let chosen = pick(&mut self.prompter, options, "Which object type would you like to browse?")?;
        kinds
            .into_iter()
            .find(|kind| chosen.as_deref() == Some(kind.keyword()))
            .ok_or(Error::NothingToBrowse)
    }

    fn query_selection(&mut self, field: &Field) -> Result<Vec<SelectionNode>, PromptError> {
        let fields = resolve(self.schema, field.ty.shallow_name())
            .map(SelectionNode::into_children)
            .unwrap_or_default();

        report::blank();
        report::json(&fields);
        report::info("The schema above represents the data to be requested.");

        let max_depth = depth(&fields);
        if max_depth == 0 {
            return Ok(fields);
        }
        report::blank();
        report::info(format!("'{}' has a query field depth of {max_depth}", field.name));
        report::info("It's STRONGLY recommended that you limit the query depth until a single full object is returned.");
        let chosen = truncate_interactively(&mut self.prompter, &fields)?;
        Ok(truncate(&fields, chosen).unwrap_or_default())
    }

    fn collect_arguments(&mut self, field: &Field) -> Result<IndexMap<String, String>, PromptError> {
        let mut raw = IndexMap::new();
        if field.args.is_empty() {
            return Ok(raw);
        }
        report::blank();
        report::info(format!(
            "'{}' has {} parameters. Those appended with '!' are required.",
            field.name,
            field.args.len()
        ));
        for arg in &field.args {
            let value = self.prompter.text(&format!("{}: ", prompt_label(arg)))?;
            raw.insert(arg.name.clone(), value);
        }
        Ok(raw)
    }
}

/// Ask for a depth, preview the cut tree, and repeat until the operator confirms.
pub fn truncate_interactively<P: Prompter + ?Sized>(
    prompter: &mut P,
    fields: &[SelectionNode],
) -> Result<usize, PromptError> {
    loop {
        let depth = prompter.depth("[?] What depth would you like to truncate the fields to?: ", DEFAULT_DEPTH)?;
        report::json(&truncate(fields, depth).unwrap_or_default());
        if prompter.confirm("[?] Is this what you want to send?: ", false)? {
            return Ok(depth);
        }
    }
}

fn display(outcome: &Outcome) {
    match outcome {
        Outcome::Errors(errors) => {
            report::failure("Got response from AppSync GraphQL:");
            report::json(errors);
        }
        Outcome::Data(data) => {
            report::success_heading("Got response from AppSync GraphQL:");
            report::json(data);
        }
    }
    report::blank();
}

// ------------------------------- Tests ------------------------------------ //
