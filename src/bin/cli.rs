//! Acervo CLI
//!
//! Terminal front end for the academic-material repository backend.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use acervo::academic::{
    self, CascadeFilter, build_course_tree, material_belongs_to, semester_counts, year_counts,
};
use acervo::api::{self, AdminApi, ApiClient, AuthApi, StatsApi, SubjectsApi, UsersApi};
use acervo::catalog::Catalog;
use acervo::error::{AppError, Result};
use acervo::flows::{ApiUploadBackend, PasswordResetFlow, ResetStep, UploadWizard};
use acervo::models::{
    Config, CourseData, MaterialType, Role, SemesterData, SubjectData, UserPatch, YearData,
};
use acervo::session::SessionStore;
use acervo::utils;

/// Acervo - academic study-material repository client
#[derive(Parser, Debug)]
#[command(
    name = "acervo",
    version,
    about = "Browse, upload, and manage academic study materials"
)]
struct Cli {
    /// Path to storage directory containing config and session files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session
    Login {
        /// Account email (prompted when omitted)
        email: Option<String>,
    },

    /// Create an account and sign in
    Register,

    /// Clear the persisted session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List courses and the most recent materials
    Browse {
        /// Keep only courses whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a course's year/semester/subject tree with counts
    Course {
        /// Course id
        id: String,

        /// Narrow to one year
        #[arg(long)]
        year: Option<String>,

        /// Narrow to one semester (needs --year)
        #[arg(long)]
        semester: Option<String>,

        /// Narrow to one subject (needs --semester)
        #[arg(long)]
        subject: Option<String>,

        /// List the filtered materials too
        #[arg(long)]
        materials: bool,
    },

    /// List materials for a subject
    Subject {
        /// Subject id
        id: String,
    },

    /// Upload a file and create its material record
    Upload {
        /// File to upload
        file: PathBuf,

        /// Course to pick the subject from
        #[arg(long)]
        course: Option<String>,
    },

    /// Recover a forgotten password via an emailed code
    ForgotPassword,

    /// Manage the signed-in account
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Site-wide entity counts
    Stats,

    /// Administrator operations
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Validate configuration files
    Validate,

    /// Show storage and session info
    Info,
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Upload/download activity for the signed-in account
    Stats,

    /// Change the account email
    SetEmail { email: String },

    /// Change the account password
    SetPassword,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// List accounts
    Users,

    /// Change an account's role (USER or ADMIN)
    SetRole { id: String, role: String },

    /// Delete an account
    DeleteUser { id: String },

    /// Delete a material
    DeleteMaterial { id: String },

    /// Upload moderation history
    Uploads,

    /// Dashboard aggregates
    Stats,

    /// Create a year
    YearAdd { name: String, order: u32 },

    /// Update a year
    YearUpdate { id: String, name: String, order: u32 },

    /// Delete a year
    YearDelete { id: String },

    /// Create a semester under a year
    SemesterAdd { name: String, year: String },

    /// Update a semester
    SemesterUpdate {
        id: String,
        name: String,
        year: String,
    },

    /// Delete a semester
    SemesterDelete { id: String },

    /// Create a course
    CourseAdd { name: String },

    /// Rename a course
    CourseUpdate { id: String, name: String },

    /// Delete a course
    CourseDelete { id: String },

    /// Create a subject
    SubjectAdd {
        name: String,
        credits: u32,
        course: String,
        semester: String,
    },

    /// Update a subject
    SubjectUpdate {
        id: String,
        name: String,
        credits: u32,
        course: String,
        semester: String,
    },

    /// Delete a subject
    SubjectDelete { id: String },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);

    let client = ApiClient::new(&config.api)?;
    let mut session = SessionStore::init(cli.storage_dir.join("session.json"));
    session.restore(&client);

    match cli.command {
        Command::Login { email } => {
            let email = match email {
                Some(email) => email,
                None => prompt("Email")?,
            };
            let password = prompt("Password")?;
            let user = session.login(&client, &email, &password).await?;
            println!("Signed in as {} <{}>", user.full_name, user.email);
        }

        Command::Register => {
            let full_name = prompt("Full name")?;
            let email = prompt("Email")?;
            let password = prompt("Password")?;
            let code = prompt("Student code")?;
            let user = session
                .register(&client, &full_name, &email, &password, &code)
                .await?;
            println!("Account created for {} <{}>", user.full_name, user.email);
        }

        Command::Logout => {
            session.logout(&client)?;
            println!("Signed out.");
        }

        Command::Whoami => match session.current_user() {
            Some(user) => {
                let role = if user.role.is_admin() { "admin" } else { "user" };
                println!("{} <{}> ({role})", user.full_name, user.email);
            }
            None => println!("Not signed in."),
        },

        Command::Browse { search } => {
            let mut catalog = Catalog::new(&client);
            let mut courses = catalog.courses().await?;
            if let Some(term) = &search {
                let needle = term.to_lowercase();
                courses.retain(|c| c.name.to_lowercase().contains(&needle));
            }

            if courses.is_empty() {
                match search {
                    Some(_) => println!("No course matches that name."),
                    None => println!("No courses available yet."),
                }
            } else {
                println!("Courses ({}):", courses.len());
                for course in &courses {
                    println!("  {}  {}", course.id, course.name);
                }
            }

            let materials = catalog.materials().await?;
            if !materials.is_empty() {
                println!("\nRecent materials:");
                for material in materials.iter().take(8) {
                    println!(
                        "  [{}] {} · {} ({})",
                        material.kind.label(),
                        utils::truncate_display(material.display_title(), 40),
                        material.subject,
                        utils::format_date(&material.created_at)
                    );
                }
            }
        }

        Command::Course {
            id,
            year,
            semester,
            subject,
            materials: list_materials,
        } => {
            let mut catalog = Catalog::new(&client);
            let details = match catalog.course_details(&id).await {
                Ok(details) => details,
                Err(AppError::Api { status, .. }) if api::http::is_not_found(status) => {
                    return Err(AppError::not_found("course", id));
                }
                Err(e) => return Err(e),
            };
            println!("{} ({} materials)\n", details.name, details.material.len());

            let snapshot = catalog.academic_snapshot(Some(&id)).await?;
            let tree = build_course_tree(
                &snapshot.years,
                &snapshot.semesters,
                &snapshot.subjects,
                &id,
            );

            let mut filter = CascadeFilter::new();
            if let Some(year_id) = year {
                filter.select_year(year_id);
            }
            if let Some(semester_id) = semester {
                filter.select_semester(semester_id);
            }
            if let Some(subject_id) = subject {
                filter.select_subject(subject_id);
            }

            let view = academic::apply(&tree, &snapshot.materials, &filter);
            if view.tree.is_empty() {
                println!("Nothing matches the selected filters.");
                return Ok(());
            }

            for year_node in &view.tree {
                let counts = year_counts(year_node, &snapshot.materials);
                println!(
                    "{}: {} subjects, {} materials, {} credits",
                    year_node.year.name,
                    counts.subject_count,
                    counts.material_count,
                    counts.credit_total
                );
                for semester_node in &year_node.semesters {
                    let counts = semester_counts(semester_node, &snapshot.materials);
                    println!(
                        "  {}: {} subjects, {} materials",
                        semester_node.semester.name, counts.subject_count, counts.material_count
                    );
                    for subject in &semester_node.subjects {
                        let material_count = snapshot
                            .materials
                            .iter()
                            .filter(|m| material_belongs_to(m, subject))
                            .count();
                        println!(
                            "    {}  {} ({} cr, {} materials)",
                            subject.id, subject.name, subject.credits, material_count
                        );
                    }
                }
            }

            if list_materials {
                println!("\nMaterials ({}):", view.materials.len());
                for material in &view.materials {
                    println!(
                        "  {}  [{}] {} · {}",
                        material.id,
                        material.kind.label(),
                        utils::truncate_display(material.display_title(), 40),
                        material.subject
                    );
                }
            }
        }

        Command::Subject { id } => {
            let subject = match SubjectsApi::new(&client).get(&id).await {
                Ok(subject) => subject,
                Err(AppError::Api { status, .. }) if api::http::is_not_found(status) => {
                    return Err(AppError::not_found("subject", id));
                }
                Err(e) => return Err(e),
            };
            let mut catalog = Catalog::new(&client);
            let materials = catalog.materials_by_subject(&subject.id).await?;

            println!("{} ({} credits)", subject.name, subject.credits);
            if materials.is_empty() {
                println!("No materials yet.");
            } else {
                for material in &materials {
                    println!(
                        "  {}  [{}] {} · {} ({})",
                        material.id,
                        material.kind.label(),
                        utils::truncate_display(material.display_title(), 40),
                        material.author,
                        utils::format_date(&material.created_at)
                    );
                }
            }
        }

        Command::Upload { file, course } => {
            let Some(user) = session.current_user() else {
                return Err(AppError::validation("sign in before uploading"));
            };
            let author = user.full_name.clone();

            let backend = ApiUploadBackend::new(&client);
            let mut wizard = UploadWizard::new(config.upload.clone());
            wizard.attach_file(&backend, &file).await?;
            log::info!("File uploaded (id {})", wizard.file_id().unwrap_or("?"));

            // Pick the subject, listing the course's subjects when known
            let subject_id = match &course {
                Some(course_id) => {
                    let mut catalog = Catalog::new(&client);
                    let subjects = catalog.subjects_by_course(course_id).await?;
                    if subjects.is_empty() {
                        return Err(AppError::validation("that course has no subjects"));
                    }
                    println!("Subjects:");
                    for subject in &subjects {
                        println!("  {}  {} ({} cr)", subject.id, subject.name, subject.credits);
                    }
                    prompt("Subject id")?
                }
                None => prompt("Subject id")?,
            };

            let file_stem = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();
            let title = prompt_with_default("Title", &file_stem)?;
            let description = prompt("Description (optional)")?;
            let suggested = wizard.suggested_kind();
            let kind_input =
                prompt_with_default("Type (FICHA, LIVRO, ...)", suggested.wire_name())?;
            let kind = MaterialType::parse(&kind_input)
                .ok_or_else(|| AppError::validation("unknown material type"))?;

            let details = wizard.details_mut();
            details.title = title;
            details.description = description;
            details.author = author;
            details.subject_id = subject_id;
            details.kind = kind;

            let material = wizard.submit(&backend).await?;
            println!("Material created: {} (id {})", material.title, material.id);
        }

        Command::ForgotPassword => {
            let auth = AuthApi::new(&client);
            let mut flow = PasswordResetFlow::new();

            let email = prompt("Email")?;
            flow.submit_email(&auth, &email).await?;
            println!("A 6-digit code was sent to {email}.");

            while flow.step() == ResetStep::Otp {
                let otp = prompt("Code (or 'back' to change the email)")?;
                if otp == "back" {
                    flow.back();
                    let email = prompt("Email")?;
                    flow.submit_email(&auth, &email).await?;
                    continue;
                }
                match flow.submit_otp(&auth, &otp).await {
                    Ok(()) => {}
                    Err(e) if e.is_validation() => println!("{e}"),
                    Err(e) => return Err(e),
                }
            }

            let password = prompt("New password")?;
            let confirm = prompt("Confirm password")?;
            flow.submit_password(&auth, &password, &confirm).await?;
            println!("Password updated. Sign in with your new password.");
        }

        Command::Profile { command } => {
            if !session.is_authenticated() {
                return Err(AppError::validation("sign in first"));
            }
            let users = UsersApi::new(&client);
            match command {
                ProfileCommand::Stats => {
                    let stats = users.stats().await?;
                    println!("Uploads:   {}", stats.total_uploads);
                    println!("Downloads: {}", stats.total_downloads);
                    if !stats.recent_activity.is_empty() {
                        println!("Recent activity:");
                        for entry in &stats.recent_activity {
                            println!(
                                "  {}  {} ({})",
                                utils::format_date(&entry.created_at),
                                entry.description,
                                entry.kind
                            );
                        }
                    }
                }
                ProfileCommand::SetEmail { email } => {
                    if !utils::is_valid_email(&email) {
                        return Err(AppError::validation("invalid email address"));
                    }
                    users.update_email(&email).await?;
                    println!("Email updated to {email}. Sign in again to refresh the session.");
                }
                ProfileCommand::SetPassword => {
                    let current = prompt("Current password")?;
                    let new = prompt("New password")?;
                    let confirm_pw = prompt("Confirm new password")?;
                    if new.len() < 6 {
                        return Err(AppError::validation(
                            "password must be at least 6 characters",
                        ));
                    }
                    if new != confirm_pw {
                        return Err(AppError::validation("passwords do not match"));
                    }
                    users.update_password(&current, &new).await?;
                    println!("Password updated.");
                }
            }
        }

        Command::Stats => {
            let stats = StatsApi::new(&client).generic().await?;
            println!("Users:     {}", stats.users);
            println!("Materials: {}", stats.materials);
            println!("Courses:   {}", stats.courses);
            println!("Subjects:  {}", stats.subjects);
        }

        Command::Admin { command } => {
            let is_admin = session
                .current_user()
                .map(|u| u.role.is_admin())
                .unwrap_or(false);
            if !is_admin {
                return Err(AppError::validation(
                    "this command requires an administrator session",
                ));
            }
            run_admin(&client, command).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (API and upload limits)");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Config file: {}",
                if config_path.exists() {
                    "exists"
                } else {
                    "not found (using defaults)"
                }
            );
            log::info!("API base URL: {}", config.api.resolve_base_url());
            match session.current_user() {
                Some(user) => log::info!("Session: {} <{}>", user.full_name, user.email),
                None => log::info!("Session: none"),
            }
        }
    }

    Ok(())
}

async fn run_admin(client: &ApiClient, command: AdminCommand) -> Result<()> {
    let admin = AdminApi::new(client);

    match command {
        AdminCommand::Users => {
            let users = admin.users().await?;
            println!("Accounts ({}):", users.len());
            for user in &users {
                let role = if user.role.is_admin() { "admin" } else { "user" };
                let state = if user.status { "active" } else { "inactive" };
                println!(
                    "  {}  {} <{}> {role}, {state}",
                    user.id, user.full_name, user.email
                );
            }
        }

        AdminCommand::SetRole { id, role } => {
            let role = match role.to_ascii_uppercase().as_str() {
                "USER" => Role::User,
                "ADMIN" => Role::Admin,
                _ => return Err(AppError::validation("role must be USER or ADMIN")),
            };
            let patch = UserPatch {
                role: Some(role),
                ..UserPatch::default()
            };
            let user = admin.update_user(&id, &patch).await?;
            println!("{} is now {:?}", user.full_name, user.role);
        }

        AdminCommand::DeleteUser { id } => {
            if !confirm(&format!("Delete user {id}? This cannot be undone."))? {
                println!("Aborted.");
                return Ok(());
            }
            admin.delete_user(&id).await?;
            println!("User {id} deleted.");
        }

        AdminCommand::DeleteMaterial { id } => {
            if !confirm(&format!("Delete material {id}? This cannot be undone."))? {
                println!("Aborted.");
                return Ok(());
            }
            let mut catalog = Catalog::new(client);
            catalog.delete_material(&id).await?;
            println!("Material {id} deleted.");
        }

        AdminCommand::Uploads => {
            let uploads = admin.uploads().await?;
            println!("Uploads ({}):", uploads.len());
            for upload in &uploads {
                println!(
                    "  {}  {:?}  {} · {} by {}",
                    upload.id,
                    upload.status,
                    utils::format_date(&upload.created_at),
                    utils::truncate_display(&upload.material.title, 40),
                    upload.user.full_name
                );
            }
        }

        AdminCommand::Stats => {
            let stats = admin.stats().await?;
            println!(
                "Materials: {} (pending {})",
                stats.total_materials, stats.pending_uploads
            );
            println!("Users:     {}", stats.total_users);
            println!("Uploads:   {}", stats.total_uploads);
            println!("Downloads: {}", stats.total_downloads);
        }

        AdminCommand::YearAdd { name, order } => {
            let mut catalog = Catalog::new(client);
            catalog.create_year(&YearData { name: name.clone(), order }).await?;
            println!("Year '{name}' created.");
        }

        AdminCommand::YearUpdate { id, name, order } => {
            let mut catalog = Catalog::new(client);
            catalog.update_year(&id, &YearData { name, order }).await?;
            println!("Year {id} updated.");
        }

        AdminCommand::YearDelete { id } => {
            if !confirm(&format!("Delete year {id}? This cannot be undone."))? {
                println!("Aborted.");
                return Ok(());
            }
            let mut catalog = Catalog::new(client);
            catalog.delete_year(&id).await?;
            println!("Year {id} deleted.");
        }

        AdminCommand::SemesterAdd { name, year } => {
            let mut catalog = Catalog::new(client);
            catalog
                .create_semester(&SemesterData {
                    name: name.clone(),
                    year_id: year,
                })
                .await?;
            println!("Semester '{name}' created.");
        }

        AdminCommand::SemesterUpdate { id, name, year } => {
            let mut catalog = Catalog::new(client);
            catalog
                .update_semester(&id, &SemesterData { name, year_id: year })
                .await?;
            println!("Semester {id} updated.");
        }

        AdminCommand::SemesterDelete { id } => {
            if !confirm(&format!("Delete semester {id}? This cannot be undone."))? {
                println!("Aborted.");
                return Ok(());
            }
            let mut catalog = Catalog::new(client);
            catalog.delete_semester(&id).await?;
            println!("Semester {id} deleted.");
        }

        AdminCommand::CourseAdd { name } => {
            let mut catalog = Catalog::new(client);
            let course = catalog.create_course(&CourseData { name }).await?;
            println!("Course '{}' created (id {}).", course.name, course.id);
        }

        AdminCommand::CourseUpdate { id, name } => {
            let mut catalog = Catalog::new(client);
            let course = catalog.update_course(&id, &CourseData { name }).await?;
            println!("Course {} renamed to '{}'.", course.id, course.name);
        }

        AdminCommand::CourseDelete { id } => {
            if !confirm(&format!("Delete course {id}? This cannot be undone."))? {
                println!("Aborted.");
                return Ok(());
            }
            let mut catalog = Catalog::new(client);
            catalog.delete_course(&id).await?;
            println!("Course {id} deleted.");
        }

        AdminCommand::SubjectAdd {
            name,
            credits,
            course,
            semester,
        } => {
            let mut catalog = Catalog::new(client);
            let subject = catalog
                .create_subject(&SubjectData {
                    name,
                    credits,
                    course_id: course,
                    semester_id: semester,
                })
                .await?;
            println!("Subject '{}' created (id {}).", subject.name, subject.id);
        }

        AdminCommand::SubjectUpdate {
            id,
            name,
            credits,
            course,
            semester,
        } => {
            let mut catalog = Catalog::new(client);
            let subject = catalog
                .update_subject(
                    &id,
                    &SubjectData {
                        name,
                        credits,
                        course_id: course,
                        semester_id: semester,
                    },
                )
                .await?;
            println!("Subject {} updated.", subject.id);
        }

        AdminCommand::SubjectDelete { id } => {
            if !confirm(&format!("Delete subject {id}? This cannot be undone."))? {
                println!("Aborted.");
                return Ok(());
            }
            let mut catalog = Catalog::new(client);
            catalog.delete_subject(&id).await?;
            println!("Subject {id} deleted.");
        }
    }

    Ok(())
}

/// Read one line of input after a label.
fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Read one line of input, falling back to a default when left empty.
fn prompt_with_default(label: &str, default: &str) -> Result<String> {
    let value = prompt(&format!("{label} [{default}]"))?;
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value
    })
}

/// Ask for explicit confirmation before a destructive action.
fn confirm(message: &str) -> Result<bool> {
    let answer = prompt(&format!("{message} [y/N]"))?;
    Ok(answer.eq_ignore_ascii_case("y"))
}
