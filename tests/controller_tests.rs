//! Integration tests for the display controller.
//!
//! The controller is driven through `dispatch` alone, with no window.

use tempfile::TempDir;
use todo_desk::cli::{Command as CliCommand, headless};
use todo_desk::db::Database;
use todo_desk::display::{Command, Controller, Notice, validate_title};
use todo_desk::error::{ErrorCode, TodoError};
use todo_desk::types::MoveDirection;

fn setup() -> (TempDir, Database, Controller) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let db = Database::open(dir.path().join("tasks.db")).expect("Failed to open database");
    let controller = Controller::new(db.clone()).expect("Failed to create controller");
    (dir, db, controller)
}

fn titles(controller: &Controller) -> Vec<String> {
    controller
        .rows()
        .iter()
        .map(|r| r.task.title.clone())
        .collect()
}

fn id_of(controller: &Controller, title: &str) -> i64 {
    controller
        .rows()
        .iter()
        .find(|r| r.task.title == title)
        .map(|r| r.task.id)
        .unwrap()
}

fn add(controller: &mut Controller, title: &str) {
    controller.dispatch(Command::Add(title.to_string())).unwrap();
}

mod add_tests {
    use super::*;

    #[test]
    fn add_renders_and_clears_input() {
        let (_dir, _db, mut controller) = setup();
        controller.input_mut().push_str("Buy milk");

        let title = controller.input().to_string();
        controller.dispatch(Command::Add(title)).unwrap();

        assert_eq!(titles(&controller), vec!["Buy milk"]);
        assert_eq!(controller.input(), "");
        assert!(controller.notice().is_none());
    }

    #[test]
    fn add_trims_title() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "  Walk dog \n");
        assert_eq!(db.list_all().unwrap()[0].title, "Walk dog");
    }

    #[test]
    fn blank_title_warns_without_mutation() {
        let (_dir, db, mut controller) = setup();
        controller.input_mut().push_str("   ");

        controller.dispatch(Command::Add("   ".into())).unwrap();

        assert!(matches!(controller.notice(), Some(Notice::Warning(_))));
        assert_eq!(db.count().unwrap(), 0);
        assert_eq!(controller.input(), "   ");

        controller.dispatch(Command::DismissNotice).unwrap();
        assert!(controller.notice().is_none());
    }

    #[test]
    fn blank_title_warning_carries_validation_message() {
        let (_dir, _db, mut controller) = setup();

        controller.dispatch(Command::Add("\t ".into())).unwrap();

        let expected = TodoError::empty_title("title").to_string();
        assert_eq!(controller.notice(), Some(&Notice::Warning(expected)));
    }

    #[test]
    fn validate_title_trims_or_rejects() {
        assert_eq!(validate_title("  Walk dog ").unwrap(), "Walk dog");

        let err = validate_title(" \n ").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.code(), ErrorCode::EmptyTitle);
        assert_eq!(err.field(), Some("title"));
    }
}

mod row_tests {
    use super::*;

    #[test]
    fn toggle_moves_row_to_completed_group() {
        let (_dir, _db, mut controller) = setup();
        add(&mut controller, "Buy milk");
        add(&mut controller, "Walk dog");

        let id = id_of(&controller, "Buy milk");
        controller
            .dispatch(Command::Toggle { id, completed: true })
            .unwrap();

        assert_eq!(titles(&controller), vec!["Walk dog", "Buy milk"]);
        let done = &controller.rows()[1];
        assert!(done.task.completed);
        assert!(!done.controls.move_up && !done.controls.move_down);
        assert!(done.controls.edit && done.controls.delete);
    }

    #[test]
    fn move_rerenders_even_when_noop() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "A");
        add(&mut controller, "B");

        // Change the store behind the controller's back; a no-op move still re-reads.
        db.create_task("C").unwrap();
        let a = id_of(&controller, "A");
        controller
            .dispatch(Command::Move {
                direction: MoveDirection::Up,
                id: a,
                order: 1,
            })
            .unwrap();

        assert_eq!(titles(&controller), vec!["A", "B", "C"]);

        controller
            .dispatch(Command::Move {
                direction: MoveDirection::Down,
                id: a,
                order: 1,
            })
            .unwrap();
        assert_eq!(titles(&controller), vec!["B", "A", "C"]);
    }
}

mod edit_tests {
    use super::*;

    #[test]
    fn edit_opens_inline_editor() {
        let (_dir, _db, mut controller) = setup();
        add(&mut controller, "Buy milk");
        let id = id_of(&controller, "Buy milk");

        controller.dispatch(Command::Edit(id)).unwrap();

        let row = &controller.rows()[0];
        assert_eq!(row.editor.as_deref(), Some("Buy milk"));
        assert!(row.controls.save);
        assert!(!row.controls.edit && !row.controls.delete);
        assert!(!row.controls.move_up && !row.controls.move_down);
    }

    #[test]
    fn save_updates_title_and_closes_editor() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "Buy milk");
        let id = id_of(&controller, "Buy milk");

        controller.dispatch(Command::Edit(id)).unwrap();
        controller.draft_mut().unwrap().text = "Buy oat milk".into();
        let text = controller.draft().unwrap().text.clone();
        controller
            .dispatch(Command::SaveEdit { id, title: text })
            .unwrap();

        assert_eq!(db.get_task(id).unwrap().unwrap().title, "Buy oat milk");
        assert!(controller.draft().is_none());
        assert!(!controller.rows()[0].is_editing());
    }

    #[test]
    fn empty_save_keeps_editor_open() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "Buy milk");
        let id = id_of(&controller, "Buy milk");

        controller.dispatch(Command::Edit(id)).unwrap();
        controller
            .dispatch(Command::SaveEdit {
                id,
                title: "  ".into(),
            })
            .unwrap();

        assert!(matches!(controller.notice(), Some(Notice::Warning(_))));
        assert!(controller.rows()[0].is_editing());
        assert_eq!(db.get_task(id).unwrap().unwrap().title, "Buy milk");
    }

    #[test]
    fn unrelated_render_keeps_draft() {
        let (_dir, _db, mut controller) = setup();
        add(&mut controller, "A");
        add(&mut controller, "B");
        let a = id_of(&controller, "A");
        let b = id_of(&controller, "B");

        controller.dispatch(Command::Edit(a)).unwrap();
        controller.draft_mut().unwrap().text = "A, half typed".into();
        controller
            .dispatch(Command::Toggle {
                id: b,
                completed: true,
            })
            .unwrap();

        let row = controller.rows().iter().find(|r| r.task.id == a).unwrap();
        assert_eq!(row.editor.as_deref(), Some("A, half typed"));
    }

    #[test]
    fn cancel_edit_restores_viewing() {
        let (_dir, _db, mut controller) = setup();
        add(&mut controller, "A");
        let a = id_of(&controller, "A");

        controller.dispatch(Command::Edit(a)).unwrap();
        controller.dispatch(Command::CancelEdit).unwrap();

        assert!(controller.draft().is_none());
        assert!(controller.rows()[0].controls.edit);
    }

    #[test]
    fn editing_missing_task_is_an_error() {
        let (_dir, _db, mut controller) = setup();
        assert!(controller.dispatch(Command::Edit(42)).is_err());
    }
}

mod delete_tests {
    use super::*;

    #[test]
    fn delete_waits_for_confirmation() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "x");
        let id = id_of(&controller, "x");

        controller.dispatch(Command::Delete(id)).unwrap();
        assert_eq!(controller.pending_delete(), Some(id));
        assert_eq!(controller.pending_delete_task().unwrap().title, "x");
        assert_eq!(db.count().unwrap(), 1);

        controller.dispatch(Command::ConfirmDelete).unwrap();
        assert_eq!(controller.pending_delete(), None);
        assert_eq!(db.count().unwrap(), 0);
        assert!(controller.rows().is_empty());
    }

    #[test]
    fn declined_delete_has_no_effect() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "x");
        let id = id_of(&controller, "x");

        controller.dispatch(Command::Delete(id)).unwrap();
        controller.dispatch(Command::CancelDelete).unwrap();
        controller.dispatch(Command::ConfirmDelete).unwrap();

        assert_eq!(db.count().unwrap(), 1);
        assert_eq!(titles(&controller), vec!["x"]);
    }

    #[test]
    fn pending_delete_dropped_when_task_disappears() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "x");
        add(&mut controller, "y");
        let x = id_of(&controller, "x");
        let y = id_of(&controller, "y");

        controller.dispatch(Command::Delete(x)).unwrap();
        db.delete_task(x).unwrap();
        controller
            .dispatch(Command::Toggle {
                id: y,
                completed: true,
            })
            .unwrap();

        assert_eq!(controller.pending_delete(), None);
        assert!(controller.pending_delete_task().is_none());
    }

    #[test]
    fn deleting_edited_task_drops_draft() {
        let (_dir, _db, mut controller) = setup();
        add(&mut controller, "x");
        let id = id_of(&controller, "x");

        controller.dispatch(Command::Edit(id)).unwrap();
        controller.dispatch(Command::Delete(id)).unwrap();
        controller.dispatch(Command::ConfirmDelete).unwrap();

        assert!(controller.draft().is_none());
    }
}

#[test]
fn storage_failure_becomes_fault_notice() {
    let (dir, _db, mut controller) = setup();
    add(&mut controller, "x");

    // Overwrite the store file with bytes that are not a database.
    let path = dir.path().join("tasks.db");
    std::fs::write(&path, "not a database ".repeat(512)).unwrap();

    controller.handle(Command::Add("y".into()));
    assert!(matches!(controller.notice(), Some(Notice::Fault(_))));
}

mod headless_tests {
    use super::*;

    #[test]
    fn add_list_done_and_move() {
        let (_dir, _db, mut controller) = setup();
        headless::run(&mut controller, CliCommand::Add { title: "Buy milk".into() }).unwrap();
        headless::run(&mut controller, CliCommand::Add { title: "Walk dog".into() }).unwrap();
        let milk = id_of(&controller, "Buy milk");
        let dog = id_of(&controller, "Walk dog");

        headless::run(&mut controller, CliCommand::Up { id: dog }).unwrap();
        assert_eq!(titles(&controller), vec!["Walk dog", "Buy milk"]);

        headless::run(&mut controller, CliCommand::Done { id: milk }).unwrap();
        let out = headless::run(
            &mut controller,
            CliCommand::List {
                format: "markdown".into(),
            },
        )
        .unwrap();
        assert_eq!(
            out,
            format!("- [ ] Walk dog (id {dog}, order 1)\n- [x] Buy milk (id {milk}, order 2)")
        );
    }

    #[test]
    fn blank_add_fails() {
        let (_dir, _db, mut controller) = setup();
        let result = headless::run(&mut controller, CliCommand::Add { title: " ".into() });
        assert!(result.is_err());
    }

    #[test]
    fn remove_requires_yes() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "x");
        let id = id_of(&controller, "x");

        assert!(headless::run(&mut controller, CliCommand::Remove { id, yes: false }).is_err());
        assert_eq!(db.count().unwrap(), 1);

        headless::run(&mut controller, CliCommand::Remove { id, yes: true }).unwrap();
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn rename_and_unknown_ids() {
        let (_dir, db, mut controller) = setup();
        add(&mut controller, "x");
        let id = id_of(&controller, "x");

        headless::run(
            &mut controller,
            CliCommand::Rename {
                id,
                title: "y".into(),
            },
        )
        .unwrap();
        assert_eq!(db.get_task(id).unwrap().unwrap().title, "y");

        assert!(headless::run(&mut controller, CliCommand::Done { id: 99 }).is_err());
        assert!(
            headless::run(
                &mut controller,
                CliCommand::List {
                    format: "xml".into()
                }
            )
            .is_err()
        );
    }
}
