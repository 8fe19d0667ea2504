//! REPL session state and command execution.

use std::io::Write;

use rand::Rng;
use tracing::debug;

use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::pokedex::Pokedex;
use crate::repl::command::{Command, COMMANDS};

/// What the REPL loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Decides a catch attempt from a roll in `0..100`.
///
/// Higher base experience makes a Pokemon harder to catch.
pub fn catch_succeeds(roll: u32, base_experience: u32) -> bool {
    roll >= 50 + base_experience / 10
}

/// Mutable state of one REPL run: pagination cursors, the caught registry
/// and the source of catch rolls.
pub struct Session<R> {
    client: PokeApiClient,
    pokedex: Pokedex,
    next_page: Option<String>,
    previous_page: Option<String>,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(client: PokeApiClient, pokedex: Pokedex, rng: R) -> Self {
        Self {
            client,
            pokedex,
            next_page: None,
            previous_page: None,
            rng,
        }
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn pokedex_mut(&mut self) -> &mut Pokedex {
        &mut self.pokedex
    }

    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Outcome> {
        debug!(?command, "Executing command");

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Outcome::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => {
                let area = area.ok_or(PokedexError::MissingArgument("a location area name"))?;
                self.explore(&area, out).await?;
            }
            Command::Catch(name) => {
                let name = name.ok_or(PokedexError::MissingArgument(
                    "the name of a Pokemon to catch",
                ))?;
                self.catch(&name, out).await?;
            }
            Command::Inspect(name) => {
                let name = name.ok_or(PokedexError::MissingArgument(
                    "the name of a Pokemon to inspect",
                ))?;
                self.inspect(&name, out)?;
            }
            Command::Pokedex => self.list_pokedex(out)?,
            Command::Unknown(_) => writeln!(out, "Unknown command")?,
        }
        Ok(Outcome::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (name, description) in COMMANDS {
            writeln!(out, "  {}: {}", name, description)?;
        }
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let page_url = self.next_page.clone();
        self.show_page(page_url.as_deref(), out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(page_url) = self.previous_page.clone() else {
            writeln!(out, "You're on the first page")?;
            return Ok(());
        };
        self.show_page(Some(&page_url), out).await
    }

    async fn show_page<W: Write>(&mut self, page_url: Option<&str>, out: &mut W) -> Result<()> {
        let page = self.client.fetch_location_areas(page_url).await?;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }

        self.next_page = page.next;
        self.previous_page = page.previous;
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;
        let names = self.client.fetch_location_area(area).await?.pokemon_names();

        if names.is_empty() {
            writeln!(out, "No Pokemon found in this area.")?;
            return Ok(());
        }

        writeln!(out, "Found Pokemon:")?;
        for name in names {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;

        if self.pokedex.contains(name) {
            writeln!(out, "{} is already in your Pokedex!", name)?;
            return Ok(());
        }

        let pokemon = self.client.fetch_pokemon(name).await?;
        let roll = self.rng.gen_range(0..100);

        if !catch_succeeds(roll, pokemon.base_experience.unwrap_or(0)) {
            writeln!(out, "{} escaped!", name)?;
            return Ok(());
        }

        self.pokedex.insert(pokemon);
        writeln!(out, "{} was caught!", name)?;
        writeln!(out, "You may now inspect it with the inspect command.")?;
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(caught) = self.pokedex.get(name) else {
            writeln!(out, "You have not caught {}", name)?;
            return Ok(());
        };
        let pokemon = &caught.pokemon;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        writeln!(
            out,
            "Caught: {}",
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty. Go catch some Pokemon!")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}
