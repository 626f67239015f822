//! Test helpers shared across the CSV parser test modules


/// A well-formed upload covering two equipment and two parameters
pub fn sample_csv() -> &'static str {
    "equipment_name,parameter_name,value,unit\n\
     Reactor A,Temperature,350.5,°C\n\
     Reactor A,Pressure,12.0,\n\
     Pump B,Temperature,80.0,°C\n"
}

/// An upload carrying the optional `type` column
pub fn sample_csv_with_type() -> &'static str {
    "equipment_name,parameter_name,value,unit,type\n\
     Reactor A,Temperature,350.5,°C,Reactor\n\
     CX-9,Flowrate,4.2,m3/h,Compressor\n"
}
