use crate::app::render;
use crate::config::cli::{AddArgs, Command, EditArgs};
use crate::core::session::Session;
use crate::core::{Confirm, IdGenerator, KeyValueStore, ParcelInput};
use crate::utils::error::{ParcelError, Result};
use serde::Serialize;

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

fn to_json<T: Serialize>(data: T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(&JsonOut { ok: true, data })?;
    out.push('\n');
    Ok(out)
}

#[derive(Serialize)]
struct DeleteReport<'a> {
    id: &'a str,
    deleted: bool,
}

fn edited_input(current: ParcelInput, args: EditArgs) -> ParcelInput {
    ParcelInput {
        name: args.name.unwrap_or(current.name),
        description: args.description.unwrap_or(current.description),
        quantity: args.quantity.unwrap_or(current.quantity),
        weight: args.weight.unwrap_or(current.weight),
    }
}

fn added_input(args: AddArgs) -> ParcelInput {
    ParcelInput::new(args.name, args.quantity, args.weight).with_description(args.description)
}

/// Runs one command through the session and returns what should be printed.
pub fn execute<S, G, C>(
    session: &mut Session<S, G>,
    command: Command,
    json: bool,
    confirmer: &mut C,
) -> Result<String>
where
    S: KeyValueStore,
    G: IdGenerator,
    C: Confirm,
{
    match command {
        Command::List => {
            if json {
                to_json(session.parcels())
            } else {
                Ok(render::render_list(session.parcels()))
            }
        }
        Command::Show { id } => {
            let parcel = session
                .collection()
                .get(&id)
                .ok_or_else(|| ParcelError::not_found(&id))?;
            if json {
                to_json(parcel)
            } else {
                Ok(render::render_parcel(parcel))
            }
        }
        Command::Add(args) => {
            session.begin_add();
            let created = match session.submit(added_input(args)) {
                Ok(created) => created,
                Err(e) => {
                    session.cancel();
                    return Err(e);
                }
            };
            if json {
                to_json(&created)
            } else {
                Ok(format!("created {}\t{}\n", created.id, created.name))
            }
        }
        Command::Edit(args) => {
            if !session.begin_edit(&args.id) {
                return Err(ParcelError::not_found(&args.id));
            }
            let current = session.form().unwrap_or_default();
            let updated = match session.submit(edited_input(current, args)) {
                Ok(updated) => updated,
                Err(e) => {
                    session.cancel();
                    return Err(e);
                }
            };
            if json {
                to_json(&updated)
            } else {
                Ok(format!("updated {}\t{}\n", updated.id, updated.name))
            }
        }
        Command::Delete { id, yes } => {
            let deleted = if yes {
                session.request_delete(&id, &mut crate::adapters::AssumeYes)?
            } else {
                session.request_delete(&id, confirmer)?
            };
            if json {
                to_json(DeleteReport { id: &id, deleted })
            } else if deleted {
                Ok(format!("deleted {}\n", id))
            } else {
                Ok("delete cancelled\n".to_string())
            }
        }
    }
}
