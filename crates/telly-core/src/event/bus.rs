// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// An unbounded, multi-producer command queue with a single consumer.
///
/// Producers (input threads, timers, tests) hold cloned senders; the runtime
/// owns the bus and drains it in order. Commands are never dropped or
/// reordered, which is what lets the runtime queue a request that arrives
/// while a channel transition is still in flight.
#[derive(Debug)]
pub struct CommandBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> CommandBus<T> {
    /// Creates a bus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("CommandBus initialized.");
        Self { sender, receiver }
    }

    /// Queues a command, logging an error if the consumer is gone.
    pub fn publish(&self, command: T) {
        log::trace!("Publishing a command.");

        if let Err(e) = self.sender.send(command) {
            log::error!("Failed to queue command: {e}. Consumer likely dropped.");
        }
    }

    /// A sender for another producer.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// The consumer end, for the bus owner.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Waits for the next command. Returns `None` once every sender,
    /// including the bus's own, is gone.
    pub async fn next(&self) -> Option<T> {
        self.receiver.recv_async().await.ok()
    }

    /// Takes every command queued right now, in order.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Number of queued commands.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl<T: Send + 'static> Default for CommandBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::{SendError, TryRecvError};
    use std::{thread, time::Duration};

    #[derive(Debug, Clone, PartialEq)]
    enum TestCommand {
        Step(i8),
        Digit(u8),
        Confirm,
    }

    #[test]
    fn fresh_bus_is_empty() {
        let bus = CommandBus::<TestCommand>::new();
        assert!(bus.receiver().is_empty());
        assert_eq!(bus.pending(), 0);
        assert!(matches!(bus.receiver().try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn drain_preserves_order() {
        let bus = CommandBus::<TestCommand>::new();
        bus.publish(TestCommand::Digit(1));
        bus.publish(TestCommand::Digit(2));
        bus.sender().send(TestCommand::Confirm).expect("send");
        assert_eq!(bus.pending(), 3);
        assert_eq!(
            bus.drain(),
            vec![TestCommand::Digit(1), TestCommand::Digit(2), TestCommand::Confirm]
        );
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn send_from_thread() {
        let bus = CommandBus::<TestCommand>::new();
        let sender = bus.sender();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            sender.send(TestCommand::Step(1)).expect("send from thread");
        });

        match bus.receiver().recv_timeout(Duration::from_secs(1)) {
            Ok(cmd) => assert_eq!(cmd, TestCommand::Step(1)),
            Err(e) => panic!("Failed to receive command from thread: {e:?}"),
        }
        handle.join().expect("Thread join failed");
    }

    #[test]
    fn send_fails_after_bus_drop() {
        let bus = CommandBus::<TestCommand>::new();
        let sender = bus.sender();
        drop(bus);
        assert!(matches!(sender.send(TestCommand::Confirm), Err(SendError(_))));
    }

    #[tokio::test]
    async fn next_awaits_queued_command() {
        let bus = CommandBus::<TestCommand>::new();
        bus.publish(TestCommand::Step(-1));
        assert_eq!(bus.next().await, Some(TestCommand::Step(-1)));
    }
}
