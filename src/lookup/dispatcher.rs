use crate::inventory::EntitySearch;
use crate::lookup::render::{format_machine_ids, to_pretty_json};
use crate::query::{EntityKind, LookupQuery, TimeWindow};
use crate::{EntlookError, Result};
use std::collections::BTreeSet;
use std::io::Write;
use tracing::debug;

/// Routes one lookup to the matching search call and renders the result.
///
/// Issues at most one remote search per invocation; zero results is a
/// reportable outcome, not an error.
pub struct EntityLookupDispatcher<'a, S> {
    search: &'a S,
}

impl<'a, S: EntitySearch> EntityLookupDispatcher<'a, S> {
    pub fn new(search: &'a S) -> Self {
        Self { search }
    }

    pub async fn dispatch<W: Write>(
        &self,
        query: &LookupQuery,
        window: &TimeWindow,
        out: &mut W,
    ) -> Result<()> {
        let request = match query.search_request(window) {
            Some(request) => request,
            None => return Err(EntlookError::Unimplemented(query.kind.keyword())),
        };

        debug!(
            "dispatching {} lookup for '{}'",
            query.kind.keyword(),
            query.value
        );

        match query.kind {
            EntityKind::User => {
                let response = self.search.search_users(&request).await?;
                if response.data.is_empty() {
                    writeln!(out, "User '{}' not found in your environment.", query.value)?;
                    return Ok(());
                }

                // distinct machine ids, ascending
                let mids: BTreeSet<i64> = response.data.iter().map(|user| user.mid).collect();

                writeln!(out, "The user has been seen in the following machines:")?;
                writeln!(out)?;
                writeln!(out, "{}", format_machine_ids(&mids))?;
                Ok(())
            }
            EntityKind::Machine => {
                let response = self.search.search_machines(&request).await?;
                if response.data.is_empty() {
                    writeln!(
                        out,
                        "Machine '{}' not found in your environment.",
                        query.value
                    )?;
                    return Ok(());
                }

                // only the first record is rendered; later results are ignored
                writeln!(out, "Machine Information:")?;
                writeln!(out, "{}", to_pretty_json(&response.data[0])?)?;
                Ok(())
            }
            // kinds without a search field were rejected above
            EntityKind::Image => Err(EntlookError::Unimplemented(query.kind.keyword())),
        }
    }
}
