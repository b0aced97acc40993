use student_registry::{
    Controller, MemoryStore, RegistryError, SqliteStore, StoreError, StudentLookup,
    StudentStore, ValidationError,
};
use tempfile::TempDir;

fn sqlite_controller() -> Controller<SqliteStore> {
    Controller::new(SqliteStore::open_in_memory().unwrap())
}

fn memory_controller() -> Controller<MemoryStore> {
    Controller::new(MemoryStore::new())
}

fn register_then_lookup_matches_average<S: StudentStore>(mut controller: Controller<S>) {
    let cases = [
        ("1", "Ana", "8.0", "9.0", 8.5),
        ("2", "Bia", "7", "6.5", 6.75),
        ("3", "Caio", "0", "10", 5.0),
        ("4", "Duda", "-2.5", "3.25", 0.38),
        ("5", "Eva", "9.99", "9.98", 9.98),
        ("6", "Fabi", "8.25", "8.0", 8.12),
        ("7", "Gil", "2.5", "2.75", 2.62),
        ("8", "Hugo", "0.25", "0", 0.12),
        ("9", "Iara", "5.35", "0", 2.67),
    ];

    for (id, name, s1, s2, expected_average) in cases {
        controller.register(id, name, s1, s2).unwrap();

        let student = controller.lookup(id.parse().unwrap()).unwrap();
        assert_eq!(student.name, name);
        assert_eq!(student.score1, s1.parse::<f64>().unwrap());
        assert_eq!(student.score2, s2.parse::<f64>().unwrap());
        assert_eq!(student.average, expected_average, "average for {s1} and {s2}");
    }
}

fn duplicate_leaves_store_unchanged<S: StudentStore>(mut controller: Controller<S>) {
    controller.register("10", "Ana", "8.0", "9.0").unwrap();
    let err = controller.register("10", "Outra", "1", "1").unwrap_err();

    assert_eq!(
        err,
        RegistryError::Store(StoreError::Duplicate { enrollment_id: 10 })
    );
    assert_eq!(controller.list_for_selection().unwrap(), vec![10]);
    assert_eq!(controller.lookup(10).unwrap().name, "Ana");
}

fn listing_returns_each_id_once<S: StudentStore>(mut controller: Controller<S>) {
    for id in ["3", "1", "2"] {
        controller.register(id, "Aluno", "5", "5").unwrap();
    }

    let mut ids = controller.list_for_selection().unwrap();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

fn rejected_input_does_not_mutate<S: StudentStore>(mut controller: Controller<S>) {
    assert_eq!(
        controller.register("1", "Ana", "abc", "9").unwrap_err(),
        RegistryError::Validation(ValidationError::NonNumeric)
    );
    assert_eq!(
        controller.register("-5", "Ana", "8", "9").unwrap_err(),
        RegistryError::Validation(ValidationError::NonPositiveId)
    );
    assert_eq!(
        controller.register("1", "", "8", "9").unwrap_err(),
        RegistryError::Validation(ValidationError::EmptyFields)
    );
    assert!(controller.list_for_selection().unwrap().is_empty());
}

#[test]
fn register_then_lookup_sqlite() {
    register_then_lookup_matches_average(sqlite_controller());
}

#[test]
fn register_then_lookup_memory() {
    register_then_lookup_matches_average(memory_controller());
}

#[test]
fn duplicate_enrollment_sqlite() {
    duplicate_leaves_store_unchanged(sqlite_controller());
}

#[test]
fn duplicate_enrollment_memory() {
    duplicate_leaves_store_unchanged(memory_controller());
}

#[test]
fn listing_sqlite() {
    listing_returns_each_id_once(sqlite_controller());
}

#[test]
fn listing_memory() {
    listing_returns_each_id_once(memory_controller());
}

#[test]
fn rejected_input_sqlite() {
    rejected_input_does_not_mutate(sqlite_controller());
}

#[test]
fn rejected_input_memory() {
    rejected_input_does_not_mutate(memory_controller());
}

#[test]
fn lookup_of_unknown_id_fails() {
    let controller = sqlite_controller();
    assert_eq!(
        controller.lookup(404).unwrap_err(),
        RegistryError::Store(StoreError::NotFound { enrollment_id: 404 })
    );
}

#[test]
fn close_twice_does_not_fail() {
    let mut controller = sqlite_controller();
    controller.close().unwrap();
    controller.close().unwrap();
    assert!(matches!(
        controller.list_for_selection().unwrap_err(),
        RegistryError::Store(StoreError::NotConnected)
    ));
}

#[test]
fn example_scenario_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("alunos.db");

    let mut controller = Controller::new(SqliteStore::open(&db_path).unwrap());
    let registered = controller.register("10", "Ana", "8.0", "9.0").unwrap();
    controller.close().unwrap();

    let controller = Controller::new(SqliteStore::open(&db_path).unwrap());
    let student = controller.lookup(10).unwrap();
    assert_eq!(student, registered);
    assert_eq!(student.enrollment_id, 10);
    assert_eq!(student.name, "Ana");
    assert_eq!(student.score1, 8.0);
    assert_eq!(student.score2, 9.0);
    assert_eq!(student.average, 8.5);
    assert_eq!(
        student.display_lines(),
        vec![
            "Enrollment: 10",
            "Name: Ana",
            "Score 1: 8.0",
            "Score 2: 9.0",
            "Average: 8.5",
        ]
    );
}

#[test]
fn view_students_flow_over_sqlite() {
    let mut controller = sqlite_controller();
    for (id, name) in [("3", "Caio"), ("1", "Ana"), ("2", "Bia")] {
        controller.register(id, name, "6", "8").unwrap();
    }

    let mut lookup = StudentLookup::new();
    lookup.open(&controller).unwrap();
    assert_eq!(lookup.ids().len(), 3);

    lookup.select(&controller, 2).unwrap();
    assert_eq!(lookup.displayed().map(|s| s.name.as_str()), Some("Bia"));
    lookup.select(&controller, 3).unwrap();
    assert_eq!(lookup.displayed().map(|s| s.name.as_str()), Some("Caio"));

    lookup.close();
    assert!(lookup.displayed().is_none());
}

#[test]
fn padded_numbers_register_on_disk() {
    let mut controller = sqlite_controller();
    controller.register(" 10", "Ana", "8.0 ", "9.0").unwrap();

    let student = controller.lookup(10).unwrap();
    assert_eq!(student.score1, 8.0);
    assert_eq!(student.average, 8.5);
}

#[test]
fn infinite_score_round_trips_through_sqlite() {
    let mut controller = sqlite_controller();
    controller.register("1", "Ana", "inf", "2").unwrap();

    let student = controller.lookup(1).unwrap();
    assert_eq!(student.score1, f64::INFINITY);
    assert_eq!(student.average, f64::INFINITY);
}
