use clap::Parser;
use school_records::config::cli::{
    ClassesCmd, CliArgs, Command, EnrollmentsCmd, PageArgs, StudentsCmd, TeachersCmd,
};
use school_records::config::session::require_role;
use school_records::core::admin::{class_label, AdminScreen};
use school_records::core::enrollments::EnrollmentEditor;
use school_records::core::login;
use school_records::core::paging::{PageView, Pager};
use school_records::core::student::StudentScreen;
use school_records::core::teacher::TeacherScreen;
use school_records::domain::model::{NewStudent, NewTeacher, Role, Signup};
use school_records::utils::error::{ClientError, ErrorSeverity, Result};
use school_records::utils::{logger, validation::Validate};
use school_records::{FileSessionStore, HttpGateway, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::debug!("Starting school-records CLI");

    // 載入設定並套用 CLI 覆寫
    let mut settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(session_file) = args.session_file {
        settings.session_path = session_file;
    }

    // 驗證設定
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 建立 gateway 與 session store
    let gateway = match HttpGateway::new(&settings) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("❌ Could not construct the HTTP gateway: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let store = FileSessionStore::new(settings.session_path.clone());

    match run(args.command, gateway, &store, &settings).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run(
    command: Command,
    gateway: HttpGateway,
    store: &FileSessionStore,
    settings: &Settings,
) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            // not used yet (stub)
            let _ = password;
            let session = login::login(&gateway, store, &email).await?;
            match session.role {
                Role::Teacher => println!(
                    "✅ Logged in as TEACHER (teacher #{})",
                    session.teacher_id.unwrap_or_default()
                ),
                Role::Student => println!(
                    "✅ Logged in as STUDENT (student #{})",
                    session.student_id.unwrap_or_default()
                ),
                Role::Admin => println!("✅ Logged in as ADMIN"),
            }
        }

        Command::Logout => {
            store.clear()?;
            println!("Signed out.");
        }

        Command::Whoami => match store.load()? {
            Some(session) => {
                println!("Role: {}", session.role);
                if let Some(id) = session.teacher_id {
                    println!("Teacher id: {}", id);
                }
                if let Some(id) = session.student_id {
                    println!("Student id: {}", id);
                }
                println!("Logged in at: {}", session.logged_in_at.to_rfc3339());
            }
            None => println!("Not logged in."),
        },

        Command::Signup {
            name,
            email,
            password,
            role,
        } => {
            let req = Signup {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                role,
                password,
            };
            login::sign_up(&gateway, &req).await?;
            println!("✅ Account created. You can now log in.");
        }

        Command::Classes(cmd) => {
            require_role(store, Role::Admin)?;
            run_classes(cmd, gateway, settings).await?;
        }

        Command::Teachers(cmd) => {
            require_role(store, Role::Admin)?;
            run_teachers(cmd, gateway, settings).await?;
        }

        Command::Students(cmd) => {
            require_role(store, Role::Admin)?;
            run_students(cmd, gateway, settings).await?;
        }

        Command::Enrollments(cmd) => {
            require_role(store, Role::Admin)?;
            run_enrollments(cmd, gateway).await?;
        }

        Command::Roster(page) => {
            let teacher_id = teacher_id_from(store)?;
            let mut screen = TeacherScreen::new(gateway, teacher_id);
            screen.refresh().await?;

            println!("My Students — Class: {}", screen.class_label());
            let pager = pager_for(&page, settings)?;
            let view = pager.view(&screen.rows);
            print_table(
                &["ID", "STUDENT", "EMAIL", "MARK"],
                view.items
                    .iter()
                    .map(|r| {
                        vec![
                            r.student.id.to_string(),
                            r.student.name.clone(),
                            r.student.email.clone(),
                            mark_cell(r.mark.as_deref()),
                        ]
                    })
                    .collect(),
            );
            print_pager(&view);
        }

        Command::SetMark { student, mark } => {
            let teacher_id = teacher_id_from(store)?;
            let mut screen = TeacherScreen::new(gateway, teacher_id);
            screen.refresh().await?;
            let updated = screen.set_mark(student, &mark).await?;
            println!(
                "✅ Mark for student #{} in {} is now {}",
                student,
                screen.class_label(),
                mark_cell(updated.mark.as_deref())
            );
        }

        Command::Marks(page) => {
            let session = require_role(store, Role::Student)?;
            let student_id = session.student_id.ok_or_else(|| ClientError::Session {
                message: "no studentId in session; log in again".to_string(),
            })?;
            let mut screen = StudentScreen::new(gateway, student_id);
            screen.refresh().await?;

            if let Some(name) = &screen.student_name {
                println!("{}", name);
            }
            println!("Grades");
            let rows = screen.rows();
            let pager = pager_for(&page, settings)?;
            let view = pager.view(&rows);
            print_table(
                &["CLASS", "MARK"],
                view.items
                    .iter()
                    .map(|r| vec![r.class_label.clone(), mark_cell(r.mark.as_deref())])
                    .collect(),
            );
            print_pager(&view);
        }
    }

    Ok(())
}

async fn run_classes(cmd: ClassesCmd, gateway: HttpGateway, settings: &Settings) -> Result<()> {
    let mut screen = AdminScreen::new(gateway);
    match cmd {
        ClassesCmd::List(page) => {
            screen.refresh_classes().await?;
            let pager = pager_for(&page, settings)?;
            let view = pager.view(&screen.classes);
            print_table(
                &["ID", "NAME"],
                view.items
                    .iter()
                    .map(|c| vec![c.id.to_string(), c.name.clone()])
                    .collect(),
            );
            print_pager(&view);
        }
        ClassesCmd::Add { name } => {
            screen.refresh_classes().await?;
            let created = screen.add_class(&name).await?;
            println!("✅ Created class #{} '{}'", created.id, created.name);
        }
        ClassesCmd::Rename { id, name } => {
            screen.refresh_classes().await?;
            let updated = screen.rename_class(id, &name).await?;
            println!("✅ Renamed class #{} to '{}'", updated.id, updated.name);
        }
        ClassesCmd::Remove { id, yes } => {
            confirm_delete(&format!("class #{}", id), yes)?;
            screen.refresh_classes().await?;
            screen.remove_class(id).await?;
            println!("✅ Deleted class #{} ({} remaining)", id, screen.classes.len());
        }
    }
    Ok(())
}

async fn run_teachers(cmd: TeachersCmd, gateway: HttpGateway, settings: &Settings) -> Result<()> {
    let mut screen = AdminScreen::new(gateway);
    match cmd {
        TeachersCmd::List(page) => {
            screen.refresh_teachers().await?;
            let pager = pager_for(&page, settings)?;
            let view = pager.view(&screen.teachers);
            print_table(
                &["ID", "NAME", "EMAIL", "CLASS"],
                view.items
                    .iter()
                    .map(|t| {
                        vec![
                            t.id.to_string(),
                            t.name.clone(),
                            t.email.clone(),
                            class_label(t.classroom.as_ref()),
                        ]
                    })
                    .collect(),
            );
            print_pager(&view);
        }
        TeachersCmd::Create {
            name,
            email,
            password,
            class_id,
        } => {
            screen.refresh_classes().await?;
            screen.refresh_teachers().await?;
            let req = NewTeacher {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password,
                class_id,
            };
            let created = screen.create_teacher(&req).await?;
            println!(
                "✅ Created teacher #{} '{}' in {}",
                created.id,
                created.name,
                class_label(created.classroom.as_ref())
            );
        }
        TeachersCmd::Update {
            id,
            name,
            email,
            class_id,
        } => {
            screen.refresh_teachers().await?;
            let updated = screen.update_teacher(id, name, email, class_id).await?;
            println!(
                "✅ Updated teacher #{} '{}' <{}> in {}",
                updated.id,
                updated.name,
                updated.email,
                class_label(updated.classroom.as_ref())
            );
        }
        TeachersCmd::Remove { id, yes } => {
            confirm_delete(&format!("teacher #{}", id), yes)?;
            screen.refresh_teachers().await?;
            screen.remove_teacher(id).await?;
            println!(
                "✅ Deleted teacher #{} ({} remaining)",
                id,
                screen.teachers.len()
            );
        }
    }
    Ok(())
}

async fn run_students(cmd: StudentsCmd, gateway: HttpGateway, settings: &Settings) -> Result<()> {
    let mut screen = AdminScreen::new(gateway);
    match cmd {
        StudentsCmd::List(page) => {
            screen.refresh_students().await?;
            let pager = pager_for(&page, settings)?;
            let view = pager.view(&screen.students);
            print_table(
                &["ID", "NAME", "EMAIL"],
                view.items
                    .iter()
                    .map(|s| vec![s.id.to_string(), s.name.clone(), s.email.clone()])
                    .collect(),
            );
            print_pager(&view);
        }
        StudentsCmd::Create {
            name,
            email,
            password,
        } => {
            let req = NewStudent {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password,
            };
            let created = screen.create_student(&req).await?;
            println!("✅ Created student #{} '{}'", created.id, created.name);
        }
        StudentsCmd::Update { id, name, email } => {
            screen.refresh_students().await?;
            let updated = screen.update_student(id, name, email).await?;
            println!(
                "✅ Updated student #{} '{}' <{}>",
                updated.id, updated.name, updated.email
            );
        }
        StudentsCmd::Remove { id, yes } => {
            confirm_delete(&format!("student #{}", id), yes)?;
            screen.refresh_students().await?;
            screen.remove_student(id).await?;
            println!(
                "✅ Deleted student #{} ({} remaining)",
                id,
                screen.students.len()
            );
        }
    }
    Ok(())
}

async fn run_enrollments(cmd: EnrollmentsCmd, gateway: HttpGateway) -> Result<()> {
    match cmd {
        EnrollmentsCmd::List { student_id } => {
            let editor = EnrollmentEditor::load(gateway, student_id).await?;
            println!(
                "Enrollments for {} <{}>",
                editor.student.name, editor.student.email
            );
            print_table(
                &["CLASS", "MARK"],
                editor
                    .enrollments
                    .iter()
                    .map(|e| {
                        vec![
                            editor.class_name(e.id.class_id),
                            mark_cell(e.mark.as_deref()),
                        ]
                    })
                    .collect(),
            );
            let addable = editor.addable_classes();
            if !addable.is_empty() {
                let names: Vec<String> = addable
                    .iter()
                    .map(|c| format!("{} (#{})", c.name, c.id))
                    .collect();
                println!("Not enrolled in: {}", names.join(", "));
            }
        }
        EnrollmentsCmd::Add {
            student_id,
            class_id,
        } => {
            let mut editor = EnrollmentEditor::load(gateway, student_id).await?;
            editor.add(class_id).await?;
            println!(
                "✅ Enrolled {} in {}",
                editor.student.name,
                editor.class_name(class_id)
            );
        }
        EnrollmentsCmd::Remove {
            student_id,
            class_id,
            yes,
        } => {
            confirm_delete(
                &format!("enrollment of student #{} in class #{}", student_id, class_id),
                yes,
            )?;
            let mut editor = EnrollmentEditor::load(gateway, student_id).await?;
            editor.remove(class_id).await?;
            println!(
                "✅ Removed {} from {}",
                editor.student.name,
                editor.class_name(class_id)
            );
        }
    }
    Ok(())
}

fn teacher_id_from(store: &FileSessionStore) -> Result<i64> {
    let session = require_role(store, Role::Teacher)?;
    session.teacher_id.ok_or_else(|| ClientError::Session {
        message: "no teacherId in session; log in again".to_string(),
    })
}

fn pager_for(page: &PageArgs, settings: &Settings) -> Result<Pager> {
    Pager::new(page.page, page.page_size.unwrap_or(settings.page_size))
}

fn confirm_delete(target: &str, yes: bool) -> Result<()> {
    if yes {
        Ok(())
    } else {
        Err(ClientError::Validation {
            message: format!("refusing to delete {} without --yes", target),
        })
    }
}

fn mark_cell(mark: Option<&str>) -> String {
    mark.unwrap_or("(none)").to_string()
}

fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let print_row = |cells: &[String]| {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            line.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
        }
        println!("{}", line.trim_end());
    };

    print_row(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    print_row(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>());
    for row in &rows {
        print_row(row);
    }
}

fn print_pager<T>(view: &PageView<'_, T>) {
    println!(
        "Page {} / {} ({} total)",
        view.page, view.total_pages, view.total_items
    );
}
