//! # Interactive Menu
//!
//! Reads an option, prompts for its fields, runs one repository call and
//! prints the outcome.
//!
//! ## Option Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   MENU ──► "Option: " ──► MenuOption ──► prompt fields                  │
//! │    ▲                                         │                          │
//! │    │                               validation fails?                    │
//! │    │                           yes ◄─────────┴────────► no              │
//! │    │                            │                        │              │
//! │    │                     print "Error: ..."      ArticleRepository      │
//! │    │                            │             (one transaction each)    │
//! │    │                            │                        │              │
//! │    │                            │          Ok ──► print result          │
//! │    │                            │          Err ─► Error / Code / Message│
//! │    │                            ▼                        │              │
//! │    └────────────────────────────┴────────────────────────┘              │
//! │                                                                         │
//! │   "q", end of input, or "y" at the increment prompt ──► leave the loop  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operation failures never end the session; only terminal I/O errors do.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use article_core::validation;
use article_core::{Article, Money};
use article_db::{Database, DbError};

use crate::error::CliResult;

const MENU_TEXT: &str = "
--------- MENU ---------------------
1  - Create table 'article'
2  - Delete table 'article'
3  - Insert article
4  - Delete article
5  - Delete articles by text
6  - Show article count
7  - Show article details
8  - Show all articles
9  - Show articles with minimum price
10 - Edit article
11 - Increment price
q  - Exit
------------------------------------";

const NOT_FOUND: &str = "Article with specified code does not exist";

// =============================================================================
// Options
// =============================================================================

/// One entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CreateTable,
    DropTable,
    Insert,
    Delete,
    DeleteMatching,
    Count,
    Details,
    ListAll,
    ListAbovePrice,
    Edit,
    IncrementPrice,
    Quit,
}

impl MenuOption {
    /// Parses the text typed at the `Option:` prompt.
    pub fn parse(input: &str) -> Option<Self> {
        let option = match input.trim() {
            "1" => MenuOption::CreateTable,
            "2" => MenuOption::DropTable,
            "3" => MenuOption::Insert,
            "4" => MenuOption::Delete,
            "5" => MenuOption::DeleteMatching,
            "6" => MenuOption::Count,
            "7" => MenuOption::Details,
            "8" => MenuOption::ListAll,
            "9" => MenuOption::ListAbovePrice,
            "10" => MenuOption::Edit,
            "11" => MenuOption::IncrementPrice,
            "q" => MenuOption::Quit,
            _ => return None,
        };
        Some(option)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

// =============================================================================
// Console
// =============================================================================

/// Line-oriented terminal: prompts, reads, prints.
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Prints `prompt` and reads one line. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Like [`Console::prompt`], but end of input reads as an empty field.
    fn field(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.prompt(prompt)?.unwrap_or_default())
    }

    fn read_code(&mut self, prompt: &str) -> io::Result<Option<i32>> {
        let input = self.field(prompt)?;
        match validation::parse_code(&input) {
            Ok(code) => Ok(Some(code)),
            Err(err) => {
                debug!(%err, "Rejected code");
                self.line("Error: invalid code")?;
                Ok(None)
            }
        }
    }

    fn read_name(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let input = self.field(prompt)?;
        match validation::validate_name(&input) {
            Ok(name) => Ok(Some(name)),
            Err(err) => {
                self.line(format_args!("Error: invalid name ({})", err))?;
                Ok(None)
            }
        }
    }

    /// Reads an optional price; `Some(None)` means the field was left blank.
    fn read_optional_price(&mut self, prompt: &str) -> io::Result<Option<Option<Money>>> {
        let input = self.field(prompt)?;
        match validation::parse_optional_price(&input) {
            Ok(price) => Ok(Some(price)),
            Err(err) => {
                self.line(format_args!("Error: invalid price ({})", err))?;
                Ok(None)
            }
        }
    }

    fn articles(&mut self, articles: &[Article]) -> io::Result<()> {
        for article in articles {
            self.line(article)?;
        }
        Ok(())
    }

    /// Prints a failed operation the way every option reports it.
    fn db_error(&mut self, err: &DbError) -> io::Result<()> {
        self.line("Error")?;
        self.line(format_args!("Code: {}", err.code()))?;
        self.line(format_args!("Message: {}", err))
    }
}

// =============================================================================
// Menu
// =============================================================================

/// The interactive session over one open database.
///
/// ## Usage
/// ```rust,ignore
/// let stdin = std::io::stdin();
/// Menu::new(&mut db, stdin.lock(), std::io::stdout()).run().await?;
/// ```
pub struct Menu<'a, R, W> {
    db: &'a mut Database,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(db: &'a mut Database, input: R, output: W) -> Self {
        Menu {
            db,
            console: Console { input, output },
        }
    }

    /// Runs until `q`, end of input, or an ending increment.
    pub async fn run(mut self) -> CliResult<()> {
        loop {
            self.console.line(MENU_TEXT)?;

            let Some(choice) = self.console.prompt("Option: ")? else {
                debug!("End of input");
                break;
            };

            let Some(option) = MenuOption::parse(&choice) else {
                self.console.line("Unknown option")?;
                continue;
            };

            debug!(?option, "Menu option selected");
            if self.dispatch(option).await? == Flow::Exit {
                break;
            }
        }

        info!("Leaving menu");
        Ok(())
    }

    async fn dispatch(&mut self, option: MenuOption) -> CliResult<Flow> {
        match option {
            MenuOption::CreateTable => self.create_table().await?,
            MenuOption::DropTable => self.drop_table().await?,
            MenuOption::Insert => self.insert().await?,
            MenuOption::Delete => self.delete().await?,
            MenuOption::DeleteMatching => self.delete_matching().await?,
            MenuOption::Count => self.count().await?,
            MenuOption::Details => self.details().await?,
            MenuOption::ListAll => self.list_all().await?,
            MenuOption::ListAbovePrice => self.list_above_price().await?,
            MenuOption::Edit => self.edit().await?,
            MenuOption::IncrementPrice => return self.increment_price().await,
            MenuOption::Quit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Options
    // =========================================================================

    async fn create_table(&mut self) -> CliResult<()> {
        match self.db.articles().create_table().await {
            Ok(()) => self.console.line("Table 'article' created")?,
            Err(DbError::TableExists { .. }) => {
                self.console.line("Error: table 'article' already exists")?
            }
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    async fn drop_table(&mut self) -> CliResult<()> {
        match self.db.articles().drop_table().await {
            Ok(()) => self.console.line("Table 'article' deleted")?,
            Err(DbError::TableMissing { .. }) => {
                self.console.line("Error: table 'article' does not exist")?
            }
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    async fn insert(&mut self) -> CliResult<()> {
        let Some(code) = self.console.read_code("Code: ")? else {
            return Ok(());
        };
        let Some(name) = self.console.read_name("Name: ")? else {
            return Ok(());
        };
        let Some(price) = self.console.read_optional_price("Price: ")? else {
            return Ok(());
        };

        let article = Article { code, name, price };
        match self.db.articles().insert(&article).await {
            Ok(()) => self.console.line("Article inserted")?,
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    async fn delete(&mut self) -> CliResult<()> {
        let Some(code) = self.console.read_code("Code to delete: ")? else {
            return Ok(());
        };

        match self.db.articles().delete(code).await {
            Ok(true) => self.console.line("Article deleted")?,
            Ok(false) => self.console.line(NOT_FOUND)?,
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    async fn delete_matching(&mut self) -> CliResult<()> {
        let input = self
            .console
            .field("Enter text to delete articles that contain it: ")?;
        let Ok(text) = validation::validate_search_text(&input) else {
            self.console.line("You must enter at least one character")?;
            return Ok(());
        };

        match self.db.articles().delete_matching(&text).await {
            Ok(deleted) => self
                .console
                .line(format_args!("{} article(s) were deleted", deleted))?,
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    async fn count(&mut self) -> CliResult<()> {
        match self.db.articles().count().await {
            Ok(count) => self.console.line(format_args!("{} articles found", count))?,
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    async fn details(&mut self) -> CliResult<()> {
        let Some(code) = self.console.read_code("Code from article to show: ")? else {
            return Ok(());
        };

        self.show_article(code).await?;
        Ok(())
    }

    async fn list_all(&mut self) -> CliResult<()> {
        match self.db.articles().list().await {
            Ok(articles) => self.console.articles(&articles)?,
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    async fn list_above_price(&mut self) -> CliResult<()> {
        let input = self.console.field("Enter the minimum price: ")?;
        let threshold = match validation::parse_price_threshold(&input) {
            Ok(threshold) => threshold,
            Err(err) => {
                self.console
                    .line(format_args!("Error: invalid price ({})", err))?;
                return Ok(());
            }
        };

        match self.db.articles().list_above_price(threshold).await {
            Ok(articles) => {
                self.console.articles(&articles)?;
                self.console
                    .line(format_args!("Total: {} articles", articles.len()))?;
            }
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    async fn edit(&mut self) -> CliResult<()> {
        let Some(code) = self.console.read_code("Code from article to edit: ")? else {
            return Ok(());
        };

        self.console.line("Article details:")?;
        if !self.show_article(code).await? {
            return Ok(());
        }

        let Some(name) = self.console.read_name("New name: ")? else {
            return Ok(());
        };
        let Some(price) = self
            .console
            .read_optional_price("New price (enter to omit): ")?
        else {
            return Ok(());
        };

        match self.db.articles().update(code, &name, price).await {
            Ok(true) => {
                self.console.line("Modified article:")?;
                self.show_article(code).await?;
            }
            // Deleted by someone else between the two prompts
            Ok(false) => self.console.line(NOT_FOUND)?,
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(())
    }

    /// Applies a percentage inside a serializable transaction and asks
    /// before committing. Answering `y` rolls back and ends the session.
    async fn increment_price(&mut self) -> CliResult<Flow> {
        let Some(code) = self
            .console
            .read_code("Code from article to increment price: ")?
        else {
            return Ok(Flow::Continue);
        };

        self.console.line("Article details:")?;
        if !self.show_article(code).await? {
            return Ok(Flow::Continue);
        }

        let input = self.console.field("Increment (%): ")?;
        let Ok(increment) = validation::parse_percentage(&input) else {
            self.console.line("Enter a valid percentage")?;
            return Ok(Flow::Continue);
        };

        let mut repo = self.db.articles();
        let pending = match repo.begin_price_increment(code, increment).await {
            Ok(pending) => pending,
            Err(err) => {
                self.console.db_error(&err)?;
                return Ok(Flow::Continue);
            }
        };

        let answer = self.console.field("End program execution? [y/...] ")?;
        if matches!(answer.trim(), "y" | "Y") {
            if let Err(err) = pending.rollback().await {
                self.console.db_error(&err)?;
            }
            return Ok(Flow::Exit);
        }

        match pending.commit().await {
            Ok(article) => {
                self.console.line("Modified article:")?;
                self.console.line(&article)?;
            }
            Err(err) => self.console.db_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Prints one article. Returns whether it exists.
    async fn show_article(&mut self, code: i32) -> CliResult<bool> {
        match self.db.articles().get(code).await {
            Ok(Some(article)) => {
                self.console.line(&article)?;
                Ok(true)
            }
            Ok(None) => {
                self.console.line(NOT_FOUND)?;
                Ok(false)
            }
            Err(err) => {
                self.console.db_error(&err)?;
                Ok(false)
            }
        }
    }
}
