use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use sailpolar::imputation::fill::linear_between;
use sailpolar::{FillLocalImputator, Imputator, RecordTable, Value};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 7, 3, 9, 30, 0).unwrap()
}

fn at(seconds: i64) -> Option<Value> {
    Some(Value::DateTime(start() + TimeDelta::seconds(seconds)))
}

fn f(v: f64) -> Option<Value> {
    Some(Value::Float(v))
}

/// A short log of boat instruments with dropouts in every channel
fn sensor_log() -> RecordTable {
    RecordTable::from_columns(vec![
        (
            "datetime",
            vec![at(0), at(10), None, at(30), at(40), None, at(900), at(910), None, at(2000)],
        ),
        (
            "TWS",
            vec![f(12.0), None, None, f(12.6), None, f(13.0), f(12.0), f(11.0), f(11.2), None],
        ),
        (
            "TWA",
            vec![None, f(40.0), f(42.0), None, f(45.0), None, f(120.0), None, None, f(90.0)],
        ),
        (
            "sail",
            vec![
                Some(Value::from("jib")),
                None,
                None,
                None,
                None,
                None,
                Some(Value::from("spi")),
                None,
                None,
                None,
            ],
        ),
        ("depth", vec![None; 10]),
    ])
    .unwrap()
}

#[test]
fn interpolates_close_gap() {
    let imp = FillLocalImputator::new().with_fill_between(linear_between);
    let mut table = RecordTable::from_columns(vec![
        ("datetime", vec![at(0), None, at(60)]),
        ("x", vec![f(5.0), None, f(7.0)]),
    ])
    .unwrap();

    let stats = imp.impute(&mut table).unwrap();

    assert_eq!(table.get("datetime", 1), at(30).as_ref());
    assert_eq!(table.get("x", 1), Some(&Value::Float(6.0)));
    assert_eq!(stats.n_filled_fields, 1);
    assert_eq!(stats.n_removed_rows, 0);
}

#[test]
fn sensor_log_is_completed() {
    let mut table = sensor_log();
    let (rows_before, cols_before) = (table.n_rows(), table.n_cols());

    let stats = FillLocalImputator::new().impute(&mut table).unwrap();

    assert!(table.is_complete());
    assert!(table.n_rows() <= rows_before);
    assert!(table.n_cols() <= cols_before);
    assert_eq!(stats.n_rows, table.n_rows());
    assert_eq!(stats.n_cols, table.n_cols());
    assert_eq!(stats.n_removed_cols, 1);
    assert!(!table.contains_key("depth"));
    assert_eq!(rows_before - stats.n_removed_rows, table.n_rows());
}

#[test]
fn sensor_log_second_pass_is_a_no_op() {
    let imp = FillLocalImputator::new();
    let mut table = sensor_log();
    imp.impute(&mut table).unwrap();
    let once = table.clone();

    let stats = imp.impute(&mut table).unwrap();

    assert!(stats.is_unchanged());
    assert_eq!(table, once);
}

#[test]
fn tiny_window_only_drops_rows() {
    let imp = FillLocalImputator::new()
        .with_max_time_diff(TimeDelta::milliseconds(1))
        .unwrap();
    let mut table = sensor_log();
    let complete_rows = (0..table.n_rows())
        .filter(|&r| {
            table
                .keys()
                .iter()
                .filter(|k| k.as_str() != "depth")
                .all(|k| table.get(k, r).is_some())
        })
        .count();

    let stats = imp.impute(&mut table).unwrap();

    assert_eq!(stats.n_filled_fields, 0);
    assert_eq!(table.n_rows(), complete_rows);
    assert!(table.is_complete());
}

#[test]
fn one_imputator_serves_many_tables() {
    let imp = FillLocalImputator::new();
    let tables = std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut table = sensor_log();
                    let stats = imp.impute(&mut table).unwrap();
                    (table, stats)
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });

    for (table, stats) in &tables {
        assert_eq!(table, &tables[0].0);
        assert_eq!(stats, &tables[0].1);
    }
}
