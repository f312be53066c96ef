//! Sample log content for tests across the workspace.

/// Three-line record followed by an unrelated one.
pub const STACK_TRACE_SAMPLE: &str = "2024-01-01 10:00:00 start\n\
stack line 1\n\
stack line 2\n\
2024-01-01 10:00:05 end\n";

/// A small service log with two multi-line error records.
pub const APP_LOG_SAMPLE: &str = "2024-01-15 12:00:01 INFO  [main] Starting order-service v2.3.1\n\
2024-01-15 12:00:02 INFO  [main] Connected to database pool size=10\n\
2024-01-15 12:00:05 ERROR [worker-1] Failed to process order 1001\n\
java.lang.IllegalStateException: inventory locked\n\
\tat com.shop.Inventory.reserve(Inventory.java:88)\n\
\tat com.shop.OrderWorker.run(OrderWorker.java:42)\n\
2024-01-15 12:00:06 WARN  [worker-2] Slow query took 1200ms\n\
2024-01-15 12:00:09 INFO  [worker-1] Retrying order 1001\n\
2024-01-15 12:00:10 ERROR [worker-3] Payment gateway timeout for order 1002\n\
java.net.SocketTimeoutException: Read timed out\n\
\tat com.shop.Payments.charge(Payments.java:131)\n\
2024-01-15 12:00:12 INFO  [worker-1] Order 1001 reserved\n";

/// `count` timestamped records; every third record carries one indented
/// continuation line. Record `i` contains the text `record {i:05}`.
pub fn numbered_records(count: usize) -> String {
    let mut out = String::new();
    for i in 0..count {
        let minute = (i / 60) % 60;
        let second = i % 60;
        out.push_str(&format!(
            "2024-01-15 12:{minute:02}:{second:02} INFO  record {i:05}\n"
        ));
        if i % 3 == 0 {
            out.push_str(&format!("    detail for {i:05}\n"));
        }
    }
    out
}
