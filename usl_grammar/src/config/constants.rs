pub mod compile_time {
    pub mod grammar {
        /// Maximum USL expression length in bytes (1MB)
        /// SECURITY: Prevents DoS attacks via enormous inputs
        pub const MAX_INPUT_LENGTH: usize = 1_048_576;

        /// Maximum recursion depth across morpheme layers and tree branches
        /// SECURITY: Prevents stack overflow via deeply nested structures
        pub const MAX_PARSE_DEPTH: usize = 100;

        /// Maximum number of `+`-alternation repetitions on one morpheme
        /// SECURITY: Prevents complexity attacks on the tokenizer
        pub const MAX_ALTERNATION_BRANCHES: usize = 1_000;

        /// Maximum number of morphemes accepted into one set
        /// RESOURCE: Bounds per-set memory usage
        pub const MAX_SET_MEMBERS: usize = 10_000;

        /// Maximum role-path length accepted by the path parser
        /// RESOURCE: Bounds path scans; must exceed MAX_PARSE_DEPTH so the
        /// recursion guard fires before the path bound on deep trees
        pub const MAX_ROLE_PATH_DEPTH: usize = 128;
    }

    pub mod logging {
        /// Maximum buffered log events
        /// RESOURCE: Controls memory usage for event capture
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Limits per-event memory consumption
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 2_048;
    }
}
