use crate::domain::model::Role;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse()
}

#[derive(Debug, Clone, Parser)]
#[command(name = "school-records")]
#[command(about = "Terminal client for the school records backend")]
#[command(version)]
pub struct CliArgs {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the records backend
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Where the session flag is stored
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in by matching your email against the user directories
    Login {
        #[arg(long)]
        email: String,

        /// Accepted for form parity; nothing verifies it
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the stored session flag
    Logout,

    /// Show the stored session flag
    Whoami,

    /// Create an account
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// ADMIN, TEACHER or STUDENT
        #[arg(long, default_value = "ADMIN", value_parser = parse_role)]
        role: Role,
    },

    /// Manage classes (ADMIN)
    #[command(subcommand)]
    Classes(ClassesCmd),

    /// Manage teachers (ADMIN)
    #[command(subcommand)]
    Teachers(TeachersCmd),

    /// Manage students (ADMIN)
    #[command(subcommand)]
    Students(StudentsCmd),

    /// Manage a student's class enrollments (ADMIN)
    #[command(subcommand)]
    Enrollments(EnrollmentsCmd),

    /// My students and their marks in my class (TEACHER)
    Roster(PageArgs),

    /// Set or update a student's mark in my class (TEACHER)
    SetMark {
        #[arg(long)]
        student: i64,

        /// Free text, e.g. "A+" or "95"
        #[arg(long)]
        mark: String,
    },

    /// My grades (STUDENT)
    Marks(PageArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// 1-based page to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page: 5, 10, 20, 50 or 100 (defaults to the configured size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ClassesCmd {
    /// List all classes
    List(PageArgs),

    /// Create a class
    Add { name: String },

    /// Rename a class
    Rename { id: i64, name: String },

    /// Delete a class
    Remove {
        id: i64,

        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TeachersCmd {
    /// List all teachers with their class assignment
    List(PageArgs),

    /// Create a teacher assigned to a class
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        class_id: i64,
    },

    /// Update a teacher; omitted fields keep their current values
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        class_id: Option<i64>,
    },

    /// Delete a teacher
    Remove {
        id: i64,

        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum StudentsCmd {
    /// List all students
    List(PageArgs),

    /// Create a student
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Update a student; omitted fields keep their current values
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a student
    Remove {
        id: i64,

        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EnrollmentsCmd {
    /// Show a student's enrollments and marks
    List { student_id: i64 },

    /// Enroll a student into a class
    Add { student_id: i64, class_id: i64 },

    /// Remove a student from a class
    Remove {
        student_id: i64,
        class_id: i64,

        #[arg(long)]
        yes: bool,
    },
}
