//! Test fixtures for temperature export parsing


/// Dual-sensor export with one event row and one malformed row
pub fn dual_sensor_export() -> String {
    [
        "\"Plot Title: Garrison Creek at Bennington \"",
        "\"#\",\"Date Time, GMT-07:00\",\"DO conc, mg/L (LGR S/N: 10736392)\",\"Temp, °C (LGR S/N: 10736392)\",\"Coupler Detached\",\"Stopped\",\"End Of File\"",
        "1,06/29/17 01:00:00 PM,8.25,18.5,,,",
        "2,06/29/17 01:15:00 PM,8.75,18.0,,,",
        "3,06/29/17 01:16:00 PM,,,Logged,,",
        "4,06/30/17 01:00:00 PM,bad,17.0,,,",
        "5,not a date,8.0,17.0,,,",
        "6,06/30/17 01:15:00 PM,9.0,16.5,,,",
    ]
    .join("\n")
}

/// Single-sensor export
pub fn single_sensor_export() -> String {
    [
        "Plot Title: Mill Creek at Tausick",
        "#,Date Time,Temp (°C),Coupler Attached,Host Connected,Stopped,End Of File",
        "1,07/01/2018 09:00,14.5,,,,",
        "2,07/01/2018 10:00,15.5,,,,",
    ]
    .join("\r\n")
}
