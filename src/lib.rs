pub mod calendarerror;

pub mod daily {
    pub mod breakplanner;
}

pub mod time {
    pub mod utility;

    pub mod recurringholiday {
        pub mod recurringholiday;
        pub mod weekendadjustment;
        pub mod fixeddateholiday;
        pub mod nthweekdayholiday;
        pub mod lastweekdayholiday;
        pub mod weekdayafterdateholiday;
        pub mod easterrelatedholiday;
        pub mod yeartableholiday;
    }

    pub mod calendar {
        pub mod holidayset;
        pub mod yearcache;
        pub mod holidaycalendar;
        pub mod rulecalendar;
        pub mod calendarconfig;
        pub mod presets;
    }
}
