use solution::Schedule;

/// Renders the schedule as a semicolon-separated table: one row per room, one
/// column per period, each cell holding the course meeting there.
pub fn room_table_csv(schedule: &Schedule) -> String {
    let program = schedule.program();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(vec![]);

    let mut header = vec!["Room".to_string()];
    header.extend(program.periods().map(|period| period.description().to_string()));
    writer
        .write_record(&header)
        .expect("Error writing csv header");

    for room in program.rooms() {
        let mut record = vec![room.name().to_string()];
        for period in program.periods() {
            let cell = schedule
                .occurring_at(period.idx())
                .get(&room.idx())
                .map(|present| {
                    let section = program
                        .get_section(present.section())
                        .expect("schedule only places sections of its program");
                    let course = program
                        .get_course(section.course())
                        .expect("sections reference existing courses");
                    course.title().to_string()
                })
                .unwrap_or_default();
            record.push(cell);
        }
        writer.write_record(&record).expect("Error writing csv row");
    }

    let bytes = writer.into_inner().expect("Error flushing csv writer");
    String::from_utf8(bytes).expect("csv output is valid utf-8")
}
